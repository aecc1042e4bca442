use std::path::Path;

use crossbeam_channel::Sender;
use tracing::{info, warn};
use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use crate::error::Result;

pub const TOOLTIP: &str = "RSS Ticker";

/// Actions reachable from the tray menu and the ticker's context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    ShowTicker,
    OpenSettings,
    OpenCurrentLink,
    Exit,
}

/// Load the tray image, or an empty (fully transparent) icon if it is missing
/// or unreadable.
pub fn load_icon(path: &Path) -> Icon {
    match decode_icon(path) {
        Ok(icon) => {
            info!("Loaded tray icon from {}", path.display());
            icon
        }
        Err(e) => {
            warn!("Tray icon not available ({e}), using empty icon");
            empty_icon()
        }
    }
}

fn decode_icon(path: &Path) -> Result<Icon> {
    let image = image::open(path)?.into_rgba8();
    let (width, height) = image.dimensions();
    Ok(Icon::from_rgba(image.into_raw(), width, height)?)
}

/// 16x16 icon with zero alpha everywhere.
fn empty_icon() -> Icon {
    let size = 16u32;
    let rgba = vec![0u8; (size * size * 4) as usize];
    Icon::from_rgba(rgba, size, size).expect("16x16 RGBA buffer is a valid icon")
}

struct MenuIds {
    show: MenuId,
    settings: MenuId,
    link: MenuId,
    exit: MenuId,
}

impl MenuIds {
    fn command(&self, id: &MenuId) -> Option<TrayCommand> {
        if id == &self.show {
            Some(TrayCommand::ShowTicker)
        } else if id == &self.settings {
            Some(TrayCommand::OpenSettings)
        } else if id == &self.link {
            Some(TrayCommand::OpenCurrentLink)
        } else if id == &self.exit {
            Some(TrayCommand::Exit)
        } else {
            None
        }
    }
}

/// Queue `command` for the ticker window, then `wake` its event loop.
/// Returns `false` once the window side has gone away.
fn forward(command: TrayCommand, tx: &Sender<TrayCommand>, wake: impl FnOnce()) -> bool {
    if tx.send(command).is_err() {
        return false;
    }
    wake();
    true
}

/// Build the system tray icon and forward its menu clicks to `tx`.
pub fn build_tray(
    icon: Icon,
    tx: Sender<TrayCommand>,
    ctx: eframe::egui::Context,
) -> Result<TrayIcon> {
    let menu = Menu::new();
    let show_item = MenuItem::new("Show Ticker", true, None);
    let settings_item = MenuItem::new("Open Settings", true, None);
    let link_item = MenuItem::new("Open Current Link", true, None);
    let exit_item = MenuItem::new("Exit", true, None);
    let ids = MenuIds {
        show: show_item.id().clone(),
        settings: settings_item.id().clone(),
        link: link_item.id().clone(),
        exit: exit_item.id().clone(),
    };

    menu.append(&show_item)?;
    menu.append(&settings_item)?;
    menu.append(&link_item)?;
    menu.append(&exit_item)?;

    let tray = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip(TOOLTIP)
        .with_icon(icon)
        .build()?;

    // Handle menu events in a background thread
    std::thread::spawn(move || {
        while let Ok(event) = MenuEvent::receiver().recv() {
            let Some(command) = ids.command(event.id()) else {
                continue;
            };
            if command == TrayCommand::Exit {
                info!("Exit requested from tray");
                std::process::exit(0);
            }
            let delivered = forward(command, &tx, || {
                // A hidden window's event loop sleeps on Windows until it is shown.
                crate::platform::show_window_native();
                ctx.request_repaint();
            });
            if !delivered {
                break;
            }
        }
    });

    Ok(tray)
}
