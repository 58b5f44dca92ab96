//! Execution tests for the translated output
//!
//! These run the emitted assembly on a small test-only model of the
//! target machine, after resolving symbols the way the downstream
//! assembler would.

mod machine;

mod translation_tests;
