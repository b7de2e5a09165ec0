use crate::error::{Result, TechSuiteError};

/// Privilege mode the application runs in, decided once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminState {
    pub is_admin: bool,
    /// The user chose to continue without elevation
    pub declined: bool,
}

impl AdminState {
    pub fn elevated() -> Self {
        Self {
            is_admin: true,
            declined: false,
        }
    }

    pub fn limited() -> Self {
        Self {
            is_admin: false,
            declined: true,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.is_admin {
            "Administrator"
        } else {
            "Limited mode"
        }
    }
}

#[cfg(windows)]
pub fn is_admin() -> bool {
    use std::mem;
    use std::ptr;
    use winapi::ctypes::c_void;

    unsafe {
        let mut handle: *mut c_void = ptr::null_mut();

        if winapi::um::processthreadsapi::OpenProcessToken(
            winapi::um::processthreadsapi::GetCurrentProcess(),
            winapi::um::winnt::TOKEN_QUERY,
            &mut handle,
        ) == 0
        {
            return false;
        }

        let mut elevation: winapi::um::winnt::TOKEN_ELEVATION = mem::zeroed();
        let mut size: u32 = 0;

        let result = winapi::um::securitybaseapi::GetTokenInformation(
            handle,
            winapi::um::winnt::TokenElevation,
            &mut elevation as *mut _ as *mut c_void,
            mem::size_of::<winapi::um::winnt::TOKEN_ELEVATION>() as u32,
            &mut size,
        );

        winapi::um::handleapi::CloseHandle(handle);

        result != 0 && elevation.TokenIsElevated != 0
    }
}

#[cfg(not(windows))]
pub fn is_admin() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// Relaunch the current executable with elevated rights.
///
/// On success an elevated instance has been started and the caller should
/// exit.
#[cfg(windows)]
pub fn request_elevation() -> Result<()> {
    use std::os::windows::process::CommandExt;
    use std::process::Command;

    let exe_path = std::env::current_exe()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    let script = relaunch_script(&exe_path.display().to_string(), &args);

    let status = Command::new("powershell")
        .args(["-NoProfile", "-Command", &script])
        .creation_flags(0x08000000) // CREATE_NO_WINDOW
        .status()
        .map_err(|e| TechSuiteError::elevation(format!("failed to run PowerShell: {}", e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(TechSuiteError::elevation(
            "elevation was cancelled or denied",
        ))
    }
}

#[cfg(not(windows))]
pub fn request_elevation() -> Result<()> {
    // No UAC equivalent; the user must rerun with sudo
    Err(TechSuiteError::elevation(
        "automatic elevation is not supported on this platform; rerun with sudo",
    ))
}

/// PowerShell command that starts `exe` elevated with `args`.
///
/// Each argument is quoted for the Windows command line, then wrapped as a
/// single-quoted PowerShell string so spaces and quotes survive both layers.
#[cfg_attr(not(windows), allow(dead_code))]
fn relaunch_script(exe: &str, args: &[String]) -> String {
    let mut script = format!("Start-Process -FilePath {} -Verb RunAs", ps_quote(exe));
    if !args.is_empty() {
        let list: Vec<String> = args.iter().map(|a| ps_quote(&cmdline_quote(a))).collect();
        script.push_str(&format!(" -ArgumentList {}", list.join(",")));
    }
    script
}

#[cfg_attr(not(windows), allow(dead_code))]
fn ps_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Quote one argument the way `CommandLineToArgvW` splits it back.
#[cfg_attr(not(windows), allow(dead_code))]
fn cmdline_quote(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '"']) {
        return arg.to_string();
    }

    let mut quoted = String::from('"');
    let mut backslashes = 0;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                quoted.push_str(&"\\".repeat(backslashes * 2 + 1));
                quoted.push('"');
                backslashes = 0;
            }
            _ => {
                quoted.push_str(&"\\".repeat(backslashes));
                quoted.push(c);
                backslashes = 0;
            }
        }
    }
    quoted.push_str(&"\\".repeat(backslashes * 2));
    quoted.push('"');
    quoted
}
