mod integration;
mod loopback;
mod table;
