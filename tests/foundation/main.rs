//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Error, Normalizer, Cursor, and SlotBinding.

mod slots;
