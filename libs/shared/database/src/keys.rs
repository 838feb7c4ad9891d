//! Storage keys shared with the browser build. Values are JSON text.

pub const USERS: &str = "users";
pub const USER_DATA: &str = "userData";
pub const ACCESS_TOKEN: &str = "accessToken";
pub const APPOINTMENTS: &str = "appointments";

/// Key under which an unparsable value is preserved before it is overwritten.
/// Attempt 0 is `<key>.corrupt`; later attempts append `.N` so an earlier
/// backup is never replaced.
pub fn corrupt_backup_key(key: &str, attempt: usize) -> String {
    match attempt {
        0 => format!("{}.corrupt", key),
        n => format!("{}.corrupt.{}", key, n),
    }
}
