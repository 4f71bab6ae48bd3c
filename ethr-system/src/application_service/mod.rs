pub mod ecdsa_service;
pub mod kustomization_service;
pub mod token_service;
