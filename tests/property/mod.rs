//! Property-based tests for region handling, naming and compilation

mod regions;
