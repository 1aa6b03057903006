pub mod caption_server;
