/// Integration tests for the habit store against real storage backends
mod sqlite_persistence;
mod store_workflow;
