mod elevator_tests;
