//! Test workloads for the scoring engine and its HTTP surface.
