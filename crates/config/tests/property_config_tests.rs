//! Property-based tests for saved-host resolution.
//!
//! Test coverage:
//! - `normalize_address` always yields `host:port`.
//! - A saved host is found whether it is looked up with or without the default port.
//! - Saved credentials survive a write/read cycle through JSON.

use proptest::prelude::*;
use secrecy::{ExposeSecret, SecretString};

use splunkd_config::{MonitorConfig, normalize_address};

fn host_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}(\\.[a-z]{2,6}){0,2}"
}

proptest! {
    #[test]
    fn bare_hosts_get_the_default_port(host in host_strategy()) {
        prop_assert_eq!(normalize_address(&host), format!("{}:8089", host));
    }

    #[test]
    fn explicit_ports_are_kept(host in host_strategy(), port in 1u16..=65535) {
        let address = format!("{}:{}", host, port);
        prop_assert_eq!(normalize_address(&address), address);
    }

    #[test]
    fn saved_hosts_resolve_with_or_without_port(
        host in host_strategy(),
        user in "[a-z]{1,12}",
        pass in "[A-Za-z0-9!@#]{1,20}",
    ) {
        let mut config = MonitorConfig::default();
        config.save_host(&host, Some(user.clone()), Some(SecretString::new(pass.clone().into())));

        let bare = config.login_for(Some(&host));
        let qualified = config.login_for(Some(&format!("{}:8089", host)));
        prop_assert_eq!(&bare.username, &user);
        prop_assert_eq!(&qualified.username, &user);
        prop_assert_eq!(bare.password.expose_secret(), pass.as_str());
    }

    #[test]
    fn saved_hosts_survive_json(host in host_strategy(), user in "[a-z]{1,12}") {
        let mut config = MonitorConfig::default();
        let key = config.save_host(&host, Some(user.clone()), None);

        let json = serde_json::to_string(&config).unwrap();
        let parsed: MonitorConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed.hosts[&key].username.as_deref(), Some(user.as_str()));
        prop_assert!(parsed.hosts[&key].password.is_none());
    }
}
