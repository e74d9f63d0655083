// Domain layer: marketplace models and ports (interfaces). No HTTP or filesystem code here.

pub mod model;
pub mod ports;
