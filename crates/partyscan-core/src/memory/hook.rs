#![cfg_attr(not(target_os = "windows"), allow(dead_code))]

use crate::error::{Error, Result};
use crate::memory::MEM1_SIZE;

#[cfg(target_os = "windows")]
use std::ffi::OsString;
#[cfg(target_os = "windows")]
use std::os::windows::ffi::OsStringExt;
#[cfg(target_os = "windows")]
use windows::Win32::Foundation::{BOOL, CloseHandle, HANDLE, LPARAM};
#[cfg(target_os = "windows")]
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW, TH32CS_SNAPPROCESS,
};
#[cfg(target_os = "windows")]
use windows::Win32::System::Memory::{
    MEM_COMMIT, MEM_MAPPED, MEMORY_BASIC_INFORMATION, VirtualQueryEx,
};
#[cfg(target_os = "windows")]
use windows::Win32::System::Threading::{
    GetExitCodeProcess, OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ,
};
#[cfg(target_os = "windows")]
use windows::Win32::UI::WindowsAndMessaging::{EnumWindows, GetWindowTextW};

const PROCESS_NAME: &str = "Dolphin.exe";

/// Window title substrings that indicate a running emulator.
///
/// The MPN build renames its window, so both are checked.
pub const WINDOW_TITLE_HINTS: &[&str] = &["Dolphin MPN", "Dolphin"];

/// A hooked Dolphin process
///
/// Holds an open process handle plus the host address of the emulated MEM1
/// mapping, located once at hook time.
#[cfg(target_os = "windows")]
pub struct DolphinHandle {
    handle: HANDLE,
    pub pid: u32,
    mem1_host_base: u64,
}

#[cfg(not(target_os = "windows"))]
pub struct DolphinHandle {
    pub pid: u32,
    mem1_host_base: u64,
}

#[cfg(target_os = "windows")]
impl DolphinHandle {
    /// Find a running Dolphin process and hook its emulated RAM
    pub fn find_and_hook() -> Result<Self> {
        let pid = find_process_id(PROCESS_NAME)?;
        Self::hook(pid)
    }

    /// Hook a Dolphin process by PID
    pub fn hook(pid: u32) -> Result<Self> {
        let handle = unsafe {
            OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, false, pid)
                .map_err(|e| Error::ProcessOpenFailed(e.to_string()))?
        };

        let mem1_host_base = match locate_mem1(handle) {
            Ok(base) => base,
            Err(e) => {
                let _ = unsafe { CloseHandle(handle) };
                return Err(e);
            }
        };

        Ok(Self {
            handle,
            pid,
            mem1_host_base,
        })
    }

    pub fn handle(&self) -> HANDLE {
        self.handle
    }

    pub fn mem1_host_base(&self) -> u64 {
        self.mem1_host_base
    }

    /// Check if the process is still running
    pub fn is_alive(&self) -> bool {
        const STILL_ACTIVE: u32 = 259;

        let mut exit_code: u32 = 0;
        // SAFETY: GetExitCodeProcess is called with a valid process handle obtained
        // from OpenProcess. The exit_code variable is passed by mutable reference.
        unsafe {
            if GetExitCodeProcess(self.handle, &mut exit_code).is_ok() {
                exit_code == STILL_ACTIVE
            } else {
                false
            }
        }
    }
}

#[cfg(not(target_os = "windows"))]
impl DolphinHandle {
    pub fn find_and_hook() -> Result<Self> {
        Err(Error::ProcessNotFound(
            "Windows only: process access not supported on this platform".to_string(),
        ))
    }

    pub fn hook(_pid: u32) -> Result<Self> {
        Err(Error::ProcessNotFound(
            "Windows only: process access not supported on this platform".to_string(),
        ))
    }

    pub fn mem1_host_base(&self) -> u64 {
        self.mem1_host_base
    }

    pub fn is_alive(&self) -> bool {
        false
    }
}

#[cfg(target_os = "windows")]
impl Drop for DolphinHandle {
    fn drop(&mut self) {
        if !self.handle.is_invalid() {
            let _ = unsafe { CloseHandle(self.handle) };
        }
    }
}

/// Check whether a top-level window matching any of the given title
/// substrings exists
///
/// Used to decide whether attempting a (re)hook is worthwhile before
/// touching the process list.
#[cfg(target_os = "windows")]
pub fn emulator_window_present(needles: &[&str]) -> bool {
    struct WindowSearch<'a> {
        needles: &'a [&'a str],
        found: bool,
    }

    unsafe extern "system" fn enum_callback(hwnd: windows::Win32::Foundation::HWND, lparam: LPARAM) -> BOOL {
        let search = unsafe { &mut *(lparam.0 as *mut WindowSearch) };

        let mut buf = [0u16; 256];
        // SAFETY: GetWindowTextW writes at most buf.len() - 1 characters plus a
        // null terminator into the provided buffer.
        let len = unsafe { GetWindowTextW(hwnd, &mut buf) };
        if len > 0 {
            let title = String::from_utf16_lossy(&buf[..len as usize]);
            if search.needles.iter().any(|n| title.contains(n)) {
                search.found = true;
                return BOOL(0); // Stop enumeration
            }
        }
        BOOL(1) // Continue enumeration
    }

    let mut search = WindowSearch {
        needles,
        found: false,
    };

    // SAFETY: EnumWindows calls the callback for each top-level window with the
    // LPARAM we pass; the pointed-to WindowSearch outlives the call.
    unsafe {
        let _ = EnumWindows(
            Some(enum_callback),
            LPARAM(&mut search as *mut WindowSearch as isize),
        );
    }

    search.found
}

#[cfg(not(target_os = "windows"))]
pub fn emulator_window_present(_needles: &[&str]) -> bool {
    false
}

#[cfg(target_os = "windows")]
fn find_process_id(name: &str) -> Result<u32> {
    let snapshot = unsafe {
        CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)
            .map_err(|e| Error::ProcessNotFound(e.to_string()))?
    };

    let mut entry = PROCESSENTRY32W {
        dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    let result = unsafe {
        if Process32FirstW(snapshot, &mut entry).is_ok() {
            loop {
                let exe_name = OsString::from_wide(
                    &entry.szExeFile[..entry
                        .szExeFile
                        .iter()
                        .position(|&c| c == 0)
                        .unwrap_or(entry.szExeFile.len())],
                );

                if exe_name.to_string_lossy().eq_ignore_ascii_case(name) {
                    let _ = CloseHandle(snapshot);
                    return Ok(entry.th32ProcessID);
                }

                if Process32NextW(snapshot, &mut entry).is_err() {
                    break;
                }
            }
        }
        Err(Error::ProcessNotFound(format!(
            "Process '{}' not found",
            name
        )))
    };

    let _ = unsafe { CloseHandle(snapshot) };
    result
}

/// Locate the emulated MEM1 mapping in the Dolphin process
///
/// Dolphin backs the emulated RAM with a file mapping, so MEM1 shows up as a
/// committed MEM_MAPPED region of at least 24 MiB. The first such region is
/// the one the emulated 0x8000_0000 range lives in.
#[cfg(target_os = "windows")]
fn locate_mem1(handle: HANDLE) -> Result<u64> {
    let mut address: usize = 0;

    loop {
        let mut info = MEMORY_BASIC_INFORMATION::default();
        // SAFETY: VirtualQueryEx fills the MEMORY_BASIC_INFORMATION struct for
        // the region containing `address` in the target process. A zero return
        // means the address is past the end of the queryable space.
        let len = unsafe {
            VirtualQueryEx(
                handle,
                Some(address as *const _),
                &mut info,
                std::mem::size_of::<MEMORY_BASIC_INFORMATION>(),
            )
        };
        if len == 0 {
            break;
        }

        if info.State == MEM_COMMIT
            && info.Type == MEM_MAPPED
            && info.RegionSize >= MEM1_SIZE as usize
        {
            return Ok(info.BaseAddress as u64);
        }

        address = match (info.BaseAddress as usize).checked_add(info.RegionSize) {
            Some(next) if next > address => next,
            _ => break,
        };
    }

    Err(Error::EmulatedRamNotFound(
        "No committed mapped region of MEM1 size found; is a game running?".to_string(),
    ))
}
