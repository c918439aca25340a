mod plan_test;
