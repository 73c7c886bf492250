//! 피어 프로토콜(PCP) 어댑터.

mod atom;
mod pcp;

pub use pcp::PcpGreeter;
