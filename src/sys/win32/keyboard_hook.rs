//! Low-level keyboard hook watching for the modifier's release.
//!
//! The hook runs during every keystroke in the session, so the callback does
//! the bare minimum and returns: match the key-up against the configured
//! modifier, test-and-clear the armed flag, capture the foreground window,
//! and hand the rest to the cycler over the channel. It never swallows a key.

use std::sync::atomic::{AtomicIsize, Ordering};
use std::thread;

use anyhow::{Context, anyhow};
use once_cell::sync::OnceCell;
use tracing::info;
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    VIRTUAL_KEY, VK_CONTROL, VK_LCONTROL, VK_LMENU, VK_MENU, VK_RCONTROL, VK_RMENU,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, GetMessageW, HHOOK, KBDLLHOOKSTRUCT, MSG, SetWindowsHookExW, WH_KEYBOARD_LL,
    WM_KEYUP, WM_SYSKEYUP,
};

use crate::actor::cycler::{self, ArmedFlag, Event};
use crate::common::config::ModifierKey;
use crate::sys::win32::window_system;

struct HookShared {
    armed: ArmedFlag,
    modifier: ModifierKey,
    events: cycler::Sender,
}

// hook callbacks carry no user data pointer, so the shared state is process-wide
static HOOK_SHARED: OnceCell<HookShared> = OnceCell::new();
static HOOK_HANDLE: AtomicIsize = AtomicIsize::new(0);

fn is_modifier_key(modifier: ModifierKey, key: VIRTUAL_KEY) -> bool {
    match modifier {
        ModifierKey::Alt => matches!(key, VK_MENU | VK_LMENU | VK_RMENU),
        ModifierKey::Control => matches!(key, VK_CONTROL | VK_LCONTROL | VK_RCONTROL),
    }
}

unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let hook = HHOOK(HOOK_HANDLE.load(Ordering::SeqCst) as *mut _);
    if code < 0 {
        return unsafe { CallNextHookEx(hook, code, wparam, lparam) };
    }

    let message = wparam.0 as u32;
    // a modifier released while another key is still down reports as a sys key-up
    if message == WM_KEYUP || message == WM_SYSKEYUP {
        let event = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };
        if let Some(shared) = HOOK_SHARED.get()
            && is_modifier_key(shared.modifier, VIRTUAL_KEY(event.vkCode as u16))
            && shared.armed.test_and_clear()
        {
            let foreground = window_system::foreground_window();
            shared.events.send(Event::ModifierReleased { foreground });
        }
    }

    unsafe { CallNextHookEx(hook, code, wparam, lparam) }
}

/// Installs the hook on a dedicated thread and parks that thread in a message
/// wait, which is what keeps the callbacks being delivered.
pub fn spawn(
    modifier: ModifierKey,
    armed: ArmedFlag,
    events: cycler::Sender,
) -> anyhow::Result<()> {
    HOOK_SHARED
        .set(HookShared { armed, modifier, events })
        .map_err(|_| anyhow!("keyboard hook already installed"))?;

    let (ready_tx, ready_rx) = crossbeam_channel::bounded::<windows::core::Result<()>>(1);
    thread::Builder::new()
        .name("keyboard-hook".to_owned())
        .spawn(move || {
            match unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_proc), None, 0) } {
                Ok(hook) => {
                    HOOK_HANDLE.store(hook.0 as isize, Ordering::SeqCst);
                    let _ = ready_tx.send(Ok(()));
                }
                Err(error) => {
                    let _ = ready_tx.send(Err(error));
                    return;
                }
            }
            info!("keyboard hook installed");

            let mut msg = MSG::default();
            while unsafe { GetMessageW(&mut msg, None, 0, 0) }.into() {}
        })
        .context("failed to spawn the keyboard hook thread")?;

    ready_rx
        .recv()
        .context("keyboard hook thread exited before reporting")?
        .map_err(|error| anyhow!("failed to install the keyboard hook: {error}"))
}
