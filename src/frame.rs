pub mod balances;
pub mod collective;
pub mod democracy;
pub mod preimage;
pub mod proxy;
pub mod referenda;
pub mod scheduler;
pub mod support;
pub mod system;
pub mod utility;
