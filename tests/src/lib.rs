//! End-to-end scenarios for the proximity engine.

#[cfg(test)]
mod engine;
