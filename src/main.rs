use std::{cell::RefCell, rc::Rc};

use dotenv::dotenv;
use rand::Rng;
use wonders_quiz::{
    presentation::{ResponsiveColor, ResponsiveText, ThemedColor, ThemedTarget},
    quiz::{
        engine::{link_language, Cue},
        ANSWER_SLOTS,
    },
    LocalizationStore, QuestionBank, QuizEngine, QuizPhase, RenderInstruction, ThemeStore,
    TourConfig, TrackingBridge, TrackingStatus,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

// Replays a visitor walking past every wonder, plus one image the tour does
// not know about.
fn main() -> HandlerResult {
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting wonders tour...");

    let config = TourConfig::from_env()?;
    log::debug!("{:?}", config);

    let localization = LocalizationStore::new(config.language);
    let theme = ThemeStore::new(config.dark_mode);

    let title = ResponsiveText::new("Scan a wonder to start the quiz")
        .with(wonders_quiz::Language::French, "Scannez une merveille pour commencer le quiz")
        .with(wonders_quiz::Language::Arabic, "امسح أحد العجائب لبدء الاختبار");
    let _title_binding = title.bind(&localization);
    let background = ResponsiveColor::new(ThemedTarget::Image, ThemedColor::default());
    let _background_binding = background.bind(&theme);

    let last_render: Rc<RefCell<Option<RenderInstruction>>> = Rc::new(RefCell::new(None));
    let render_sink = last_render.clone();
    let engine = QuizEngine::new(QuestionBank::builtin())
        .with_language(config.language)
        .with_audio(|cue: Cue| log::info!("Playing {:?} cue", cue))
        .with_display(move |instruction: &RenderInstruction| {
            *render_sink.borrow_mut() = Some(instruction.clone());
        })
        .into_shared();
    let _language_link = link_language(&engine, &localization);

    let mut bridge =
        TrackingBridge::new(engine.clone()).with_canvas_offset(config.canvas_offset);

    println!("{}", title.text());
    let targets: Vec<String> = QuestionBank::builtin()
        .targets()
        .map(str::to_string)
        .chain(std::iter::once("Atlantis".to_string()))
        .collect();

    let mut rng = rand::thread_rng();
    for target in &targets {
        bridge.on_status_changed(target, TrackingStatus::NoPose, TrackingStatus::Detected);
        print_render(&last_render)?;

        loop {
            let phase = engine.borrow().phase();
            match phase {
                QuizPhase::InProgress { .. } => {
                    let choice = rng.gen_range(0..ANSWER_SLOTS);
                    engine.borrow_mut().submit_answer(choice);
                }
                QuizPhase::Answered { index, .. } => {
                    print_render(&last_render)?;
                    // Hand the visitor a new language halfway through.
                    if index == 1 {
                        localization.cycle();
                        println!("{}", title.text());
                    }
                    engine.borrow_mut().advance();
                }
                _ => break,
            }
        }
        print_render(&last_render)?;

        bridge.on_status_changed(target, TrackingStatus::Tracked, TrackingStatus::NoPose);
        theme.toggle();
        log::debug!("Background is now {:?}", background.color());
    }

    log::info!("Tour finished");
    Ok(())
}

fn print_render(last_render: &Rc<RefCell<Option<RenderInstruction>>>) -> HandlerResult {
    if let Some(instruction) = last_render.borrow().as_ref() {
        println!("{}", serde_json::to_string_pretty(instruction)?);
    }
    Ok(())
}
