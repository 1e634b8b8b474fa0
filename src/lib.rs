//! Workspace-level integration tests for fibdrv. See `tests/`.
