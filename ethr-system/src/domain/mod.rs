pub mod key_pair;
pub mod kustomization;
pub mod target_path;
pub mod token;
