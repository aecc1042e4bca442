/// Title the ticker window is created with; used to find it natively.
pub const WINDOW_TITLE: &str = "Ticky";

/// On Windows a window hidden with `ViewportCommand::Visible(false)` gets no
/// `WM_PAINT`, so egui's `update()` never runs again and tray commands
/// would sit in their channel forever. Showing the window through
/// Win32 directly wakes the event loop.
///
/// No-op on other platforms, where `request_repaint()` is enough.
pub fn show_window_native() {
    #[cfg(windows)]
    {
        use windows_sys::Win32::UI::WindowsAndMessaging::{SetForegroundWindow, ShowWindow, SW_SHOW};

        if let Some(hwnd) = find_window() {
            unsafe {
                ShowWindow(hwnd, SW_SHOW);
                SetForegroundWindow(hwnd);
            }
        }
    }
}

/// Hide the ticker immediately so the OS removes it before egui presents
/// another frame. No-op on other platforms.
pub fn hide_window_native() {
    #[cfg(windows)]
    {
        use windows_sys::Win32::UI::WindowsAndMessaging::{ShowWindow, SW_HIDE};

        if let Some(hwnd) = find_window() {
            unsafe {
                ShowWindow(hwnd, SW_HIDE);
            }
        }
    }
}

#[cfg(windows)]
fn find_window() -> Option<windows_sys::Win32::Foundation::HWND> {
    use windows_sys::Win32::UI::WindowsAndMessaging::FindWindowW;

    let title: Vec<u16> = WINDOW_TITLE.encode_utf16().chain(Some(0)).collect();
    let hwnd = unsafe { FindWindowW(std::ptr::null(), title.as_ptr()) };
    (!hwnd.is_null()).then_some(hwnd)
}
