// Domain layer: data model and ports (interfaces). No transport or filesystem code here.

pub mod model;
pub mod ports;
