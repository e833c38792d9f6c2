pub mod audit;
pub mod audit_loggers;
pub mod audit_types;
pub mod error_handling;
