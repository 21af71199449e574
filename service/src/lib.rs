pub mod deletion_coordinator;
pub mod document_store;
pub mod inventory_controller;
pub mod selection;
pub mod view_models;

#[cfg(test)]
pub mod gateway_mock;
