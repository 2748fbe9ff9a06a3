pub mod account;
pub mod aws_config;
pub mod ec2;
pub mod pipeline;
pub mod profiles;
pub mod regions;
pub mod report;
pub mod writer;
