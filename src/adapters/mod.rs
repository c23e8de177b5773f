// Adapters layer: concrete probes talking to real hosts.

pub mod tcp_probe;

pub use tcp_probe::TcpProbe;
