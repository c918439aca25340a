pub mod grammar_cells;


pub use grammar_cells::{GrammarCellsL3, RolloutTrace};
