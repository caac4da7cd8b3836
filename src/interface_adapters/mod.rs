// Interface adapters: backend clients, wire paths and session storage.

pub mod clients;
pub mod http;
pub mod protocol;
pub mod state;
pub mod storage;
