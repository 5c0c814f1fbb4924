mod shipped_tests;
