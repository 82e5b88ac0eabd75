/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) are the seams the application core uses to
/// reach infrastructure: the record store and progress output.
pub mod outbound;
