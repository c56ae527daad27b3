//! Shared building blocks for the city store binaries: logging setup,
//! startup environment checks, the admin listener and small wire types.

pub mod types;
pub mod utils;
pub mod env;
pub mod admin_http;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }
}
