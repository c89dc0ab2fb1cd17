mod app_tests;
