pub mod allowed_hosts;
