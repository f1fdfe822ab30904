mod database;
mod myconfig;

pub use self::database::{
    ConnectionManager, ConnectionPool, ConnectionState, DynSchemaBootstrap, SchemaBootstrap,
    is_connection_lost,
};
pub use self::myconfig::{DatabaseConfig, lookup_first, parse_flag};
