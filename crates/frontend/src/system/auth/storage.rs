//! localStorage хранит только последний логин (для "recordarme").
//! Токены живут в httpOnly cookies и сюда не попадают.

use web_sys::window;

const LAST_USERNAME_KEY: &str = "stockeate_last_username";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn save_last_username(username: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(LAST_USERNAME_KEY, username);
    }
}

pub fn get_last_username() -> Option<String> {
    get_local_storage()?
        .get_item(LAST_USERNAME_KEY)
        .ok()?
        .filter(|u| !u.is_empty())
}

pub fn clear_last_username() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(LAST_USERNAME_KEY);
    }
}
