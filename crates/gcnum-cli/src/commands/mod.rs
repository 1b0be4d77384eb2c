pub mod cn;
pub mod gcn;
