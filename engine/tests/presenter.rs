use dicecup_engine::presenter::{render_html, render_text, render_theme_text, READY_TEXT};
use dicecup_engine::{Presenter, RollResult, Statistics, Theme, Tone};

fn sample() -> (RollResult, Statistics) {
    let roll = RollResult::new(vec![3, 6, 1, 4]).unwrap();
    let stats = Statistics::compute(roll.values()).unwrap();
    (roll, stats)
}

#[test]
fn starts_ready() {
    let p = Presenter::default();
    assert_eq!(p.view().message, READY_TEXT);
    assert_eq!(p.view().tone, Tone::Info);
    assert!(p.view().images.is_empty());
}

#[test]
fn result_lists_one_image_per_value() {
    let (roll, stats) = sample();
    let mut p = Presenter::default();
    p.show_result(&roll);
    p.show_statistics(stats);

    let view = p.view();
    assert_eq!(view.message, "Dice rolled: 3, 6, 1, 4");
    let srcs: Vec<String> = view.images.iter().map(|i| i.src()).collect();
    assert_eq!(
        srcs,
        [
            "dice_images/3.png",
            "dice_images/6.png",
            "dice_images/1.png",
            "dice_images/4.png"
        ]
    );
    assert_eq!(view.stats, Some(stats));
}

#[test]
fn error_and_rolling_clear_images() {
    let (roll, stats) = sample();
    let mut p = Presenter::default();
    p.show_last_roll(&roll, stats);
    assert_eq!(p.view().message, "Last roll: 3, 6, 1, 4");

    p.show_error("Please enter a valid number.");
    assert_eq!(p.view().tone, Tone::Error);
    assert!(p.view().images.is_empty());
    assert_eq!(p.view().stats, None);

    p.show_rolling();
    assert_eq!(p.view().tone, Tone::Info);
    assert!(p.view().images.is_empty());
}

#[test]
fn text_rendering() {
    let (roll, stats) = sample();
    let mut p = Presenter::default();
    p.show_result(&roll);
    p.show_statistics(stats);
    insta::assert_snapshot!(render_text(p.view()), @r"
    Dice rolled: 3, 6, 1, 4
    ⚂ ⚅ ⚀ ⚃
    Total: 14
    Average: 3.50
    Highest Roll: 6
    Lowest Roll: 1
    ");

    p.show_error("Number of dice must be greater than 0.");
    assert_eq!(render_text(p.view()), "⚠ Number of dice must be greater than 0.");
}

#[test]
fn html_rendering() {
    let mut p = Presenter::new(Theme::Light);
    p.show_result(&RollResult::new(vec![2, 5]).unwrap());
    p.show_statistics(Statistics::compute(&[2, 5]).unwrap());
    insta::assert_snapshot!(render_html(p.page()), @r#"
    <main class="light-mode">
    <button id="themeToggle">Dark Mode</button>
    <p id="diceResult" class="info">Dice rolled: 2, 5</p>
    <div id="diceImages"><img src="dice_images/2.png" alt="Dice 2" class="dice-image"><img src="dice_images/5.png" alt="Dice 5" class="dice-image"><div class="dice-stats"><p><strong>Total:</strong> 7</p><p><strong>Average:</strong> 3.50</p><p><strong>Highest Roll:</strong> 5</p><p><strong>Lowest Roll:</strong> 2</p></div></div>
    </main>
    "#);
}

#[test]
fn theme_view_offers_the_other_mode() {
    let mut p = Presenter::default();
    assert_eq!(render_theme_text(&p.page().theme), "Theme: dark (toggle: Light Mode)");
    p.show_theme(Theme::Light);
    assert_eq!(p.page().theme.toggle_label, "Dark Mode");
    assert_eq!(p.page().theme.body_class, Some("light-mode"));
}

#[test]
fn json_view_carries_image_keys() {
    let (roll, _) = sample();
    let mut p = Presenter::default();
    p.show_result(&roll);
    let json = serde_json::to_value(p.view()).unwrap();
    assert_eq!(json["tone"], "info");
    assert_eq!(json["images"][1]["src"], "dice_images/6.png");
    assert_eq!(json["images"][1]["alt"], "Dice 6");
    assert!(json["stats"].is_null());
}
