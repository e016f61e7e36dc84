use counter_demo::app::counter_app;
use counter_demo::host::HeadlessHost;
use zipcompose_ui::graphics::Size;
use zipcompose_ui::{Theme, ThemeManager};

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== zipcompose headless counter ===");

    let theme = ThemeManager::new(Theme::light());
    let mut host = HeadlessHost::new(Size::new(320.0, 240.0), theme.clone(), counter_app);
    host.tick()?;
    println!("initial: {:?}", host.texts());

    for key in ["increment", "increment", "increment", "decrement", "theme"] {
        host.click(key)?;
        host.tick()?;
        println!("after {key}: {:?}", host.texts());
    }
    println!("dark theme active: {}", theme.current() == Theme::dark());

    println!();
    println!("{}", host.dump_tree());
    Ok(())
}
