use crate::settings;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use pairmatch_core as game;
use yew::prelude::*;

/// Options read from the location hash.
#[derive(Args, Properties, Clone, Debug, Default, PartialEq)]
pub(crate) struct GameArgs {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Board dimension, overrides the stored setting
    #[arg(short, long)]
    pub dimension: Option<game::Coord>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Flip(game::Coord2),
    Tick(game::Generation),
    Fire { id: u32, task: game::DelayedTask },
    Start,
    Reset,
    ToggleSettings,
    UpdateSettings(settings::Settings),
}

/// Extra class names for a card, matching the stylesheet's flip animation.
fn face_classes(face: game::CardFace) -> &'static [&'static str] {
    match (face.is_face_up(), face) {
        (false, _) => &[],
        (true, game::CardFace::Matched) => &["flipped", "matched"],
        (true, _) => &["flipped"],
    }
}

/// Stored settings are fitted to the pool, an explicit hash dimension is passed through as is.
fn initial_settings(
    stored: settings::Settings,
    args: &GameArgs,
    pool: &game::ImagePool,
) -> settings::Settings {
    match args.dimension {
        Some(dimension) => settings::Settings { dimension },
        None => stored.fit_to(pool),
    }
}

/// Builds the next session, numbering its generations after `previous`.
fn new_session(
    settings: settings::Settings,
    pool: &game::ImagePool,
    seed: u64,
    previous: game::Generation,
) -> Option<game::Session> {
    game::Session::new(settings.game_config(), pool.clone(), seed)
        .inspect_err(|err| log::error!("Could not create game: {}", err))
        .ok()
        .map(|session| session.after(previous))
}

/// Drops timeouts queued for an earlier generation, which cancels them.
fn retain_current<T>(timeouts: &mut Vec<(u32, game::Generation, T)>, current: game::Generation) {
    timeouts.retain(|(_, generation, _)| *generation == current);
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    pos: game::Coord2,
    face: game::CardFace,
    image: AttrValue,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::Coord2>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        pos,
        face,
        image,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!("card");
    for name in face_classes(face) {
        class.push(*name);
    }
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("{:?} click", pos);
        callback.emit(pos);
    });

    html! {
        <div {class} {onclick}>
            <div class="card-front"/>
            <div class="card-back"><img src={image}/></div>
        </div>
    }
}

pub(crate) struct GameView {
    settings: settings::Settings,
    pool: game::ImagePool,
    session: Option<game::Session>,
    settings_open: bool,
    ticker: Option<Interval>,
    timeouts: Vec<(u32, game::Generation, Timeout)>,
    next_timeout_id: u32,
    last_generation: game::Generation,
}

impl GameView {
    fn create_session(&mut self, seed: u64) {
        self.ticker = None;
        self.timeouts.clear();
        if let Some(session) = self.session.as_ref() {
            self.last_generation = session.generation();
        }
        self.session = new_session(self.settings, &self.pool, seed, self.last_generation);
    }

    fn score(&self) -> game::Score {
        self.session
            .as_ref()
            .map_or_else(game::Score::default, |session| session.score())
    }

    fn can_start(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.can_start())
    }

    fn get_game_state_class(&self) -> &'static str {
        use game::SessionState::*;
        match self.session.as_ref().map(|session| session.state()) {
            None => "unavailable",
            Some(Idle) => "idle",
            Some(Running) => "running",
            Some(Won) => "won",
        }
    }

    /// Hands the session's timer requests to browser timers.
    fn run_commands(&mut self, ctx: &Context<Self>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let current = session.generation();

        for command in session.take_commands() {
            log::debug!("command: {:?}", command);
            match command {
                game::Command::StartTicker { generation, period } => {
                    let link = ctx.link().clone();
                    self.ticker = Some(Interval::new(timer_millis(period), move || {
                        link.send_message(Msg::Tick(generation))
                    }));
                }
                game::Command::StopTicker => {
                    self.ticker = None;
                }
                game::Command::Schedule(task) => {
                    let id = self.next_timeout_id;
                    self.next_timeout_id = self.next_timeout_id.wrapping_add(1);
                    let link = ctx.link().clone();
                    let timeout = Timeout::new(timer_millis(task.delay), move || {
                        link.send_message(Msg::Fire { id, task })
                    });
                    self.timeouts.push((id, task.generation, timeout));
                }
            }
        }

        retain_current(&mut self.timeouts, current);
    }

    fn flip(&mut self, pos: game::Coord2) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match session.flip(pos) {
            Ok(outcome) => {
                log::debug!("flip {:?}: {:?}", pos, outcome);
                outcome.has_update()
            }
            Err(err) => {
                log::error!("flip {:?} rejected: {}", pos, err);
                false
            }
        }
    }

    fn start(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match session.start() {
            Ok(outcome) => outcome == game::StartOutcome::Started,
            Err(err) => {
                log::error!("Could not start game: {}", err);
                false
            }
        }
    }

    fn reset(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if let Err(err) = session.reset() {
            log::error!("Could not reset game: {}", err);
        }
        true
    }

    fn view_win(&self) -> Html {
        let Some(score) = self.session.as_ref().and_then(|session| session.summary()) else {
            return html! { <div class="win" hidden={true}/> };
        };

        html! {
            <div class="win" aria-label={score.win_text()}>
                <span class="win-text">
                    {"You won!"}<br/>
                    {"with "}<span class="highlight">{score.moves.to_string()}</span>{" moves"}<br/>
                    {"in "}<span class="highlight">{score.seconds.to_string()}</span>{" seconds"}
                </span>
            </div>
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let Some(session) = self.session.as_ref() else {
            return html! { <div class="board"/> };
        };
        let dimension = session.board().dimension();
        let style = format!("grid-template-columns: repeat({dimension}, auto)");
        let callback = ctx.link().callback(Msg::Flip);

        html! {
            <div class="board" data-dimension={dimension.to_string()} {style}>
                {
                    for session.board().iter_with_coords().map(|(pos, card)| {
                        let image: AttrValue = session
                            .image_at(pos)
                            .map(|image| AttrValue::from(image.to_owned()))
                            .unwrap_or_else(|| AttrValue::from(""));
                        let locked = !session.can_flip(pos);
                        html! {
                            <CardView {pos} face={card.face} {image} {locked} callback={callback.clone()}/>
                        }
                    })
                }
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameArgs;

    fn create(ctx: &Context<Self>) -> Self {
        let args = ctx.props();
        let pool = game::ImagePool::default();
        let settings = initial_settings(LocalOrDefault::local_or_default(), args, &pool);

        let mut view = Self {
            settings,
            pool,
            session: None,
            settings_open: false,
            ticker: None,
            timeouts: Vec::new(),
            next_timeout_id: 0,
            last_generation: game::Generation::default(),
        };
        view.create_session(args.seed.unwrap_or_else(js_random_seed));
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Flip(pos) => self.flip(pos),
            Tick(generation) => self
                .session
                .as_mut()
                .is_some_and(|session| session.tick(generation)),
            Fire { id, task } => {
                self.timeouts.retain(|(other, _, _)| *other != id);
                self.session
                    .as_mut()
                    .is_some_and(|session| session.run(task).has_update())
            }
            Start => self.start(),
            Reset => self.reset(),
            ToggleSettings => {
                self.settings_open = !self.settings_open;
                true
            }
            UpdateSettings(settings) => {
                let settings = settings.fit_to(&self.pool);
                if self.settings != settings {
                    self.settings = settings;
                    self.settings.local_save();
                    self.create_session(js_random_seed());
                    true
                } else {
                    false
                }
            }
        };

        self.run_commands(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use settings::SettingsView;
        use Msg::*;

        let score = self.score();
        let won = self.session.as_ref().is_some_and(|session| session.state().is_won());
        let can_start = self.can_start();

        let cb_start = ctx.link().callback(move |e: MouseEvent| {
            e.stop_propagation();
            Start
        });
        let cb_reset = ctx.link().callback(|_| Reset);
        let cb_toggle_settings = ctx.link().callback(|_| ToggleSettings);

        html! {
            <div class={classes!("pairmatch", self.get_game_state_class())}>
                <small onclick={cb_toggle_settings}>{"···"}</small>
                <nav>
                    <aside class="moves">{score.moves_text()}</aside>
                    <span>
                        <button id="start-btn" class={classes!((!can_start).then_some("disabled"))} disabled={!can_start} onclick={cb_start}>{"Start"}</button>
                        <button id="reset-btn" onclick={cb_reset}>{"Reset"}</button>
                    </span>
                    <aside class="timer">{score.timer_text()}</aside>
                </nav>
                <div class={classes!("board-container", won.then_some("flipped"))}>
                    { self.view_board(ctx) }
                    { self.view_win() }
                </div>
                <SettingsView
                    open={self.settings_open}
                    current={self.settings}
                    dimensions={self.pool.supported_dimensions().collect::<Vec<_>>()}
                    on_change={ctx.link().callback(UpdateSettings)}
                    on_close={ctx.link().callback(|_| ToggleSettings)}
                />
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matched_cards_keep_the_flipped_class() {
        assert!(face_classes(game::CardFace::Hidden).is_empty());
        assert_eq!(face_classes(game::CardFace::Flipped), ["flipped"]);
        assert_eq!(face_classes(game::CardFace::Matched), ["flipped", "matched"]);
    }

    #[test]
    fn hash_dimension_is_not_corrected() {
        let pool = game::ImagePool::default();
        let args = GameArgs {
            seed: None,
            dimension: Some(3),
        };

        let settings = initial_settings(settings::Settings::default(), &args, &pool);
        assert_eq!(settings.dimension, 3);
        assert!(new_session(settings, &pool, 0, game::Generation::default()).is_none());
    }

    #[test]
    fn stored_dimension_is_fitted() {
        let pool = game::ImagePool::default();
        let stored = settings::Settings { dimension: 8 };

        let settings = initial_settings(stored, &GameArgs::default(), &pool);
        assert_eq!(settings.dimension, 4);
        assert!(new_session(settings, &pool, 0, game::Generation::default()).is_some());
    }

    #[test]
    fn new_session_continues_generations() {
        let pool = game::ImagePool::default();
        let settings = settings::Settings { dimension: 2 };

        let session = new_session(settings, &pool, 1, game::Generation(4)).unwrap();
        assert_eq!(session.generation(), game::Generation(5));
    }

    #[test]
    fn old_generation_timeouts_are_dropped() {
        let mut timeouts = vec![
            (0, game::Generation(1), ()),
            (1, game::Generation(2), ()),
            (2, game::Generation(1), ()),
        ];

        retain_current(&mut timeouts, game::Generation(2));
        assert_eq!(timeouts, [(1, game::Generation(2), ())]);
    }

    #[test]
    fn hash_args_parse_seed_and_dimension() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            game: GameArgs,
        }

        let args = Wrapper::try_parse_from(["", "--seed=42", "-d", "2"]).unwrap().game;
        assert_eq!(
            args,
            GameArgs {
                seed: Some(42),
                dimension: Some(2),
            }
        );
    }
}
