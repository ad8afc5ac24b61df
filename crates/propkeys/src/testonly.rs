//! Test-only functionality shared among multiple test modules.

use crate::ConfigKeys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ConfigKeys)]
#[config(crate = crate, properties_path = "config/app.properties")]
pub(crate) enum AppKey {
    Ignored,
    Host,
    #[config(validate = is_port)]
    Port,
}

pub(crate) fn is_port(value: &str) -> bool {
    value.parse::<u16>().is_ok_and(|port| port != 0)
}

pub(crate) fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ConfigKeys)]
#[config(crate = crate, properties_path = "config/db.yaml")]
#[config(provider = "DbProvider", qualifier = "Db", rename_all = "dot.case")]
#[config(validate = crate::testonly::not_blank, pass(derive(Clone)))]
pub(crate) enum DbKey {
    DbUrl,
    #[config(null)]
    Unset,
    #[config(rename = "db.pool_size", validate = Self::is_pool_size)]
    PoolSize,
    #[config(rename = "db.schema")]
    Schema,
}

impl DbKey {
    fn is_pool_size(value: &str) -> bool {
        value.parse::<usize>().is_ok_and(|size| (1..=100).contains(&size))
    }
}
