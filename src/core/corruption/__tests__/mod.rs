mod corruptor_test;
