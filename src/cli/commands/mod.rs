pub mod audit_cmd;
pub mod completions;
pub mod login;
pub mod profile;
pub mod register;
pub mod users;
pub mod vault_add;
pub mod vault_delete;
pub mod vault_list;
pub mod vault_update;
