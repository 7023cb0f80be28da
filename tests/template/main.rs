//! Integration tests for Layer 2: Template
//!
//! Tests for the template compiler and the lazy expander over real lexicons.

mod expansion;
