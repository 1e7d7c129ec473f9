use fastcap::prelude::*;

fn main() -> FastcapResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 用法: screen_capture <设备 ID> [输出路径]
    let mut args = std::env::args().skip(1);
    let Some(device_id) = args.next() else {
        println!("用法: screen_capture <设备 ID> [输出路径]");
        return Ok(());
    };
    let output_path = args.next().unwrap_or_else(|| "screenshot.png".to_string());

    let config = ADBConfig::discover().unwrap_or_default();
    let adb = ADB::new(Some(config));

    println!("正在检查并安装 minicap...");
    let device = MinicapDevice::new(&adb, &device_id)?;
    println!(
        "设备 {} ({}, sdk {}): {}",
        device.device_id(),
        device.install_report().profile.abi(),
        device.install_report().profile.sdk(),
        device.install_report().outcome
    );
    println!("屏幕尺寸: {}", device.screen());

    device.capture_to(&output_path)?;
    println!("截图已保存到: {}", output_path);

    Ok(())
}
