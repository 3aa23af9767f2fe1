use gloo::timers::callback::Interval;
use minado_core as game;
use yew::prelude::*;

use self::settings::Settings;
use self::utils::{format_counter, js_random_seed, LocalOrDefault, LocalSave};

mod settings;
mod utils;

pub(crate) enum Msg {
    LeftClick(game::Coord2),
    RightClick(game::Coord2),
    Tick,
    NewGame,
    SelectDifficulty(u8),
    ToggleSound,
}

/// Renders the board and drives the engine with discrete events. Owns the
/// 1-second interval while the engine clock runs; dropping the interval
/// cancels it, so terminal states, resets, and teardown all stop the ticks.
pub(crate) struct GameView {
    settings: Settings,
    game: game::Game,
    timer: Option<Interval>,
}

impl GameView {
    fn start_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1_000, move || link.send_message(Msg::Tick))
    }

    /// Keeps the interval in lockstep with the engine clock.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        if self.game.timer_running() {
            if self.timer.is_none() {
                self.timer = Some(Self::start_timer(ctx));
            }
        } else {
            self.timer = None;
        }
    }

    fn status_face(&self) -> &'static str {
        use game::GameStatus::*;
        match self.game.status() {
            Playing => "🙂",
            Won => "😎",
            Lost => "😵",
        }
    }

    fn difficulty_button(&self, ctx: &Context<Self>, difficulty: game::Difficulty) -> Html {
        let index = difficulty.index();
        let class = classes!((difficulty == self.game.difficulty()).then_some("active"));
        let onclick = ctx.link().callback(move |_| Msg::SelectDifficulty(index));
        html! {
            <button {class} {onclick}>{ difficulty.label() }</button>
        }
    }

    fn cell_view(&self, ctx: &Context<Self>, coords: game::Coord2) -> Html {
        let cell = self.game.cell_at(coords);

        let mut class = classes!("cell");
        let mut label = String::new();
        if cell.is_revealed {
            if cell.is_mine {
                class.push("mine");
                label.push_str("💣");
            } else if cell.is_flagged {
                // wrong flag exposed by the lose sweep
                class.push(classes!("flag", "wrong"));
                label.push_str("❌");
            } else {
                class.push(classes!("open", format!("num-{}", cell.adjacent_mines)));
                if cell.adjacent_mines > 0 {
                    label.push_str(&cell.adjacent_mines.to_string());
                }
            }
        } else if cell.is_flagged {
            class.push("flag");
            label.push_str("🚩");
        }

        let onclick = ctx.link().callback(move |_| Msg::LeftClick(coords));
        let oncontextmenu = ctx.link().callback(move |e: MouseEvent| {
            e.prevent_default();
            Msg::RightClick(coords)
        });

        html! {
            <td {class} {onclick} {oncontextmenu}>{ label }</td>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let settings = Settings::local_or_default();
        Self {
            settings,
            game: game::Game::new(settings.difficulty, js_random_seed()),
            timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            LeftClick(coords) => {
                let outcome = self.game.left_click(coords);
                log::debug!("left click {:?}: {:?}", coords, outcome);
                outcome.has_update()
            }
            RightClick(coords) => {
                let outcome = self.game.right_click(coords);
                log::debug!("right click {:?}: {:?}", coords, outcome);
                outcome.has_update()
            }
            Tick => self.game.tick(),
            NewGame => {
                self.game.reset(js_random_seed());
                true
            }
            SelectDifficulty(index) => match game::Difficulty::try_from(index) {
                Ok(difficulty) => {
                    if self.settings.difficulty != difficulty {
                        self.settings.difficulty = difficulty;
                        self.settings.local_save();
                    }
                    self.game.set_difficulty(difficulty, js_random_seed());
                    true
                }
                Err(err) => {
                    log::warn!("{}", err);
                    false
                }
            },
            ToggleSound => {
                self.settings.sound = !self.settings.sound;
                self.settings.local_save();
                true
            }
        };

        self.sync_timer(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (rows, cols) = self.game.size();
        let mines_left = format_counter(self.game.mines_left());
        let elapsed = format_counter(self.game.elapsed_secs() as isize);
        let cb_new_game = ctx.link().callback(|_| Msg::NewGame);
        let cb_sound = ctx.link().callback(|_: Event| Msg::ToggleSound);

        html! {
            <div class="minado" oncontextmenu={Callback::from(|e: MouseEvent| e.prevent_default())}>
                <header>
                    { for game::Difficulty::ALL.iter().map(|&d| self.difficulty_button(ctx, d)) }
                </header>
                <nav>
                    <aside>{ mines_left }</aside>
                    <span><button onclick={cb_new_game}>{ self.status_face() }</button></span>
                    <aside>{ elapsed }</aside>
                </nav>
                <table>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                { for (0..cols).map(|col| self.cell_view(ctx, (row, col))) }
                            </tr>
                        })
                    }
                </table>
                <footer>
                    <label>
                        <input type="checkbox" checked={self.settings.sound} onchange={cb_sound}/>
                        { "sound" }
                    </label>
                </footer>
            </div>
        }
    }
}
