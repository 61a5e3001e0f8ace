use bitflags::bitflags;
use clap::Args;
use gloo::timers::callback::Timeout;
use ndarray::Array2;
use octoseek_core as game;

use game::ToNdIndex;
use yew::prelude::*;

const INTRO_LINES: [&str; 3] = [
    "The octopus likes to hide.",
    "Where will they hide next?",
    "Perhaps you can find them!",
];

bitflags! {
    /// Per-cell visual state owned by the board; the engine only ever asks to
    /// set or clear one flag at a time.
    #[derive(Copy, Clone, Debug, PartialEq)]
    pub(crate) struct CellFlags: u8 {
        const OCTOPUS = 1;
        const SAD     = 1 << 1;
    }
}

impl From<game::CellFlag> for CellFlags {
    fn from(flag: game::CellFlag) -> Self {
        match flag {
            game::CellFlag::Highlight => CellFlags::OCTOPUS,
            game::CellFlag::Error => CellFlags::SAD,
        }
    }
}

fn apply_board_ops(flags: &mut Array2<CellFlags>, ops: &[game::BoardOp]) {
    for &op in ops {
        match op {
            game::BoardOp::Set(cell, flag) => flags[cell.to_nd_index()].insert(flag.into()),
            game::BoardOp::Clear(cell, flag) => flags[cell.to_nd_index()].remove(flag.into()),
        }
    }
}

fn cell_classes(color: game::CellColor, flags: CellFlags) -> Classes {
    let mut class = classes!(
        "pixel",
        match color {
            game::CellColor::Black => "pixel-b",
            game::CellColor::White => "pixel-w",
            game::CellColor::Green => "pixel-g",
        }
    );
    if flags.contains(CellFlags::OCTOPUS) {
        class.push("octopus");
    }
    if flags.contains(CellFlags::SAD) {
        class.push("sad");
    }
    class
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Phase {
    Intro,
    Hold,
    AwaitClick,
    Completed,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Begin,
    HoldElapsed,
    CellClicked(game::Coord2),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    color: game::CellColor,
    #[prop_or(CellFlags::empty())]
    flags: CellFlags,
    callback: Callback<game::Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        color,
        flags,
        callback,
    } = props.clone();

    let class = cell_classes(color, flags);
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("({}, {}) click", row, col);
        callback.emit((row, col));
    });

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Start from a specific level instead of the first
    #[arg(short, long)]
    level: Option<usize>,
}

/// The board collaborator: renders the pixel grid, owns the visual flags and
/// the one-shot click gate, and pumps timer/click events into the engine.
pub(crate) struct GameView {
    logo: game::PixelGrid,
    runner: game::LevelRunner,
    flags: Array2<CellFlags>,
    phase: Phase,
    _hold_timer: Option<Timeout>,
}

impl GameView {
    fn schedule_hold(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        self._hold_timer = Some(Timeout::new(game::HOLD_MILLIS, move || {
            link.send_message(Msg::HoldElapsed)
        }));
    }

    /// Applies an engine transition: board ops onto the flag grid, then the
    /// follow-up the new phase asks for.
    fn drive(
        &mut self,
        ctx: &Context<Self>,
        result: game::Result<(game::BoardOps, game::GamePhase)>,
    ) -> bool {
        match result {
            Ok((ops, phase)) => {
                apply_board_ops(&mut self.flags, &ops);
                self.phase = match phase {
                    game::GamePhase::Hold => {
                        self.schedule_hold(ctx);
                        Phase::Hold
                    }
                    game::GamePhase::AwaitClick => Phase::AwaitClick,
                    game::GamePhase::Completed => {
                        log::info!("all levels cleared");
                        Phase::Completed
                    }
                };
                true
            }
            Err(err) => {
                log::error!("engine rejected event: {err}");
                false
            }
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(_ctx: &Context<Self>) -> Self {
        let logo = game::PixelGrid::logo();
        let catalog = game::LevelCatalog::builtin().expect("Built-in level data is invalid");
        let flags = Array2::from_elem(logo.size().to_nd_index(), CellFlags::empty());

        Self {
            logo,
            runner: game::LevelRunner::new(catalog),
            flags,
            phase: Phase::Intro,
            _hold_timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Begin => {
                if self.phase != Phase::Intro {
                    return false;
                }
                log::debug!("starting game");
                let start = match ctx.props().level {
                    Some(level) => self.runner.start_at(level),
                    None => self.runner.start(),
                };
                self.drive(ctx, start)
            }
            Msg::HoldElapsed => {
                if self.phase != Phase::Hold {
                    log::warn!("hold timer fired outside a hold phase");
                    return false;
                }
                let result = self.runner.on_hold_elapsed();
                self.drive(ctx, result)
            }
            Msg::CellClicked(pos) => {
                // One-shot gate: clicks only count while one is awaited, and
                // handling it moves the phase on before the next can arrive.
                if self.phase != Phase::AwaitClick {
                    return false;
                }
                log::debug!("cell clicked: {pos:?}");
                let result = self.runner.on_click(pos);
                self.drive(ctx, result)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.phase == Phase::Intro {
            let onclick = ctx.link().callback(|_: MouseEvent| Msg::Begin);
            return html! {
                <div class="octoseek intro" {onclick}>
                    <ul>
                        { for INTRO_LINES.iter().map(|line| html! { <li>{ *line }</li> }) }
                    </ul>
                </div>
            };
        }

        let (rows, cols) = self.logo.size();
        html! {
            <div class="octoseek">
                if self.phase == Phase::Completed {
                    <nav class="win">{ "You found the octopus every time!" }</nav>
                }
                <table>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let pos = (row, col);
                                        let color = self.logo[pos];
                                        let flags = self.flags[pos.to_nd_index()];
                                        let callback = ctx.link().callback(Msg::CellClicked);
                                        html! {
                                            <CellView {row} {col} {color} {flags} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_flags_map_onto_board_flags() {
        assert_eq!(
            CellFlags::from(game::CellFlag::Highlight),
            CellFlags::OCTOPUS
        );
        assert_eq!(CellFlags::from(game::CellFlag::Error), CellFlags::SAD);
    }

    #[test]
    fn board_ops_set_and_clear_cell_flags() {
        let mut flags = Array2::from_elem([3, 3], CellFlags::empty());

        apply_board_ops(
            &mut flags,
            &[
                game::BoardOp::Set((1, 2), game::CellFlag::Highlight),
                game::BoardOp::Set((1, 2), game::CellFlag::Error),
            ],
        );
        assert_eq!(flags[[1, 2]], CellFlags::OCTOPUS | CellFlags::SAD);

        apply_board_ops(
            &mut flags,
            &[game::BoardOp::Clear((1, 2), game::CellFlag::Highlight)],
        );
        assert_eq!(flags[[1, 2]], CellFlags::SAD);
        assert_eq!(flags[[0, 0]], CellFlags::empty());
    }

    #[test]
    fn playback_ops_from_the_engine_light_the_expected_cells() {
        let catalog = game::LevelCatalog::builtin().unwrap();
        let mut runner = game::LevelRunner::new(catalog);
        let mut flags = Array2::from_elem([15, 12], CellFlags::empty());

        let (ops, phase) = runner.start().unwrap();
        apply_board_ops(&mut flags, &ops);
        assert_eq!(phase, game::GamePhase::Hold);
        assert_eq!(flags[[0, 0]], CellFlags::OCTOPUS);

        let (ops, _) = runner.on_hold_elapsed().unwrap();
        apply_board_ops(&mut flags, &ops);
        assert_eq!(flags[[0, 0]], CellFlags::empty());
        assert_eq!(flags[[0, 1]], CellFlags::OCTOPUS);
    }

    #[test]
    fn cell_classes_follow_color_and_flags() {
        let class = cell_classes(game::CellColor::Green, CellFlags::OCTOPUS);
        assert!(class.contains("pixel"));
        assert!(class.contains("pixel-g"));
        assert!(class.contains("octopus"));
        assert!(!class.contains("sad"));

        let class = cell_classes(game::CellColor::Black, CellFlags::SAD);
        assert!(class.contains("pixel-b"));
        assert!(class.contains("sad"));
    }
}
