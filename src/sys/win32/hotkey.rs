//! The global cycle hotkey, registered and pumped on a dedicated thread.

use std::thread;

use anyhow::{Context, anyhow};
use tracing::info;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MAPVK_VSC_TO_VK, MOD_ALT, MOD_CONTROL, MapVirtualKeyW, RegisterHotKey,
};
use windows::Win32::UI::WindowsAndMessaging::{GetMessageW, MSG, WM_HOTKEY};

use crate::actor::cycler::{self, Event};
use crate::common::config::ModifierKey;

/// Scan code of the backtick/grave key, the fixed cycle trigger.
const BACKTICK_SCAN_CODE: u32 = 0x29;

fn modifier_flags(modifier: ModifierKey) -> HOT_KEY_MODIFIERS {
    match modifier {
        ModifierKey::Alt => MOD_ALT,
        ModifierKey::Control => MOD_CONTROL,
    }
}

/// Registers modifier+backtick as a global hotkey and forwards every press to
/// the cycler. The hotkey is scoped to the thread that registers it, so
/// registration runs on the pump thread itself and its outcome comes back
/// over a rendezvous channel.
pub fn spawn(modifier: ModifierKey, events: cycler::Sender) -> anyhow::Result<()> {
    let (ready_tx, ready_rx) = crossbeam_channel::bounded::<windows::core::Result<()>>(1);
    thread::Builder::new()
        .name("hotkey".to_owned())
        .spawn(move || {
            let trigger = unsafe { MapVirtualKeyW(BACKTICK_SCAN_CODE, MAPVK_VSC_TO_VK) };
            let registered = unsafe { RegisterHotKey(None, 0, modifier_flags(modifier), trigger) };
            let failed = registered.is_err();
            let _ = ready_tx.send(registered);
            if failed {
                return;
            }
            info!(%modifier, trigger, "cycle hotkey registered");

            let mut msg = MSG::default();
            while unsafe { GetMessageW(&mut msg, None, 0, 0) }.into() {
                if msg.message == WM_HOTKEY {
                    events.send(Event::CyclePressed);
                }
            }
        })
        .context("failed to spawn the hotkey thread")?;

    ready_rx
        .recv()
        .context("hotkey thread exited before reporting")?
        .map_err(|error| anyhow!("failed to register the cycle hotkey: {error}"))
}
