#[cfg(windows)]
#[tokio::main]
async fn main() -> anyhow::Result<()> { wincycle::app::run().await }

#[cfg(not(windows))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("wincycle drives Win32 hotkeys and input hooks; it only runs on Windows")
}
