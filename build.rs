// Grazer Launcher build script.
//
// Embeds assets/icon.ico as the Windows EXE resource (titlebar, taskbar,
// Alt+Tab, Explorer). Detection goes through CARGO_CFG_TARGET_OS so
// cross-compiling to Windows from another host still embeds the icon.
// Everywhere else this is a no-op; the window icon comes from the PNG at
// runtime instead.

fn main() {
    println!("cargo:rerun-if-changed=assets/icon.ico");
    println!("cargo:rerun-if-changed=assets/icon.png");

    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        winres::WindowsResource::new()
            .set_icon("assets/icon.ico")
            .compile()
            .expect("winres failed; a C toolchain (MSVC or MinGW) is required");
    }
}
