mod bilinear_test;
