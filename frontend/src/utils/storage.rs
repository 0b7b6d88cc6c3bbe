use web_sys::{Storage, Window};

/// Keys written by the sign-in flow; cleared when the session expires.
pub const SESSION_KEYS: [&str; 3] = ["access_token", "refresh_token", "current_user"];

pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

pub fn local_storage() -> Result<Storage, String> {
    window()?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

pub fn clear_session_keys() -> Result<(), String> {
    let storage = local_storage()?;
    for key in SESSION_KEYS {
        storage
            .remove_item(key)
            .map_err(|_| format!("Failed to remove {}", key))?;
    }
    Ok(())
}
