pub mod file_system;
pub mod marshalers;
pub mod os_random_source;
pub mod p256_key_pair;
pub mod path_resolver;
