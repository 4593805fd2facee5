#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use anyhow::Context;
    use clap::{Parser, Subcommand};

    use dgs_scorecard::config::{self, Config, DEFAULT_BASE_URL};
    use dgs_scorecard::score::format_score_difference;
    use dgs_scorecard::view::RESULT_HEADERS;
    use dgs_scorecard::{
        classify, logger, HttpBackend, ScorecardBackend, ScorecardController, ScorecardId,
    };

    #[derive(Parser, Debug)]
    #[command(name = "dgs-scorecard", about = "Query a disc golf scorecard backend")]
    struct Args {
        /// Root url of the scorecard backend
        #[arg(long, env = "DGS_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
        #[arg(long, default_value = "warn")]
        log_level: String,
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Name a hole result
        Classify { strokes: i32, par: i32 },
        /// Courses with rounds, optionally only those a player has played
        Courses {
            #[arg(long)]
            player: Option<String>,
        },
        Layouts { course: String },
        Players { course: String, layout: String },
        /// Best rounds of a player on a layout
        Scores {
            player: String,
            course: String,
            layout: String,
            /// A number or `all`
            #[arg(long, default_value = "10")]
            limit: String,
        },
        /// Hole by hole breakdown of one scorecard
        Holes { scorecard_id: ScorecardId },
    }

    pub fn run() -> anyhow::Result<()> {
        let args = Args::parse();
        logger::init(config::parse_level(&args.log_level)?);

        let config = Config::with_base_url(args.base_url).validate()?;
        let backend = HttpBackend::new(&config.base_url)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start the async runtime")?;
        runtime.block_on(execute(
            ScorecardController::new(backend, config.default_limit),
            args.command,
        ))
    }

    async fn execute(
        mut controller: ScorecardController<HttpBackend>,
        command: Command,
    ) -> anyhow::Result<()> {
        match command {
            Command::Classify { strokes, par } => {
                let category = classify(strokes, par);
                println!("{} ({})", category, category.css_class());
            }
            Command::Courses { player: None } => {
                print_list(&controller.backend().courses_for_all_players().await?)
            }
            Command::Courses {
                player: Some(player),
            } => print_list(
                &controller
                    .backend()
                    .courses_for_player(&player)
                    .await
                    .with_context(|| format!("Could not get courses for {}", player))?,
            ),
            Command::Layouts { course } => print_list(
                &controller
                    .backend()
                    .layouts_for_course(&course)
                    .await
                    .with_context(|| format!("Could not get layouts for {}", course))?,
            ),
            Command::Players { course, layout } => print_list(
                &controller
                    .backend()
                    .players_for_course_and_layout(&course, &layout)
                    .await?,
            ),
            Command::Scores {
                player,
                course,
                layout,
                limit,
            } => {
                controller.set_limit(&limit)?;
                controller.set_player_options(vec![player.clone()]);
                controller.select_player(&player).await?;
                controller
                    .select_course(&course)
                    .await
                    .with_context(|| format!("{} has no rounds at {}", player, course))?;
                controller.select_layout(&layout).await?;
                anyhow::ensure!(
                    controller.form().players.selected() == Some(player.as_str()),
                    "{} has no rounds on {} / {}",
                    player,
                    course,
                    layout
                );

                let view = controller.submit().await?;
                if let Some(message) = &view.message {
                    println!("{}", message);
                    return Ok(());
                }
                println!(
                    "{:<8}{:<20}{:<20}{:<16}{:>12}{:>6}",
                    "Id",
                    RESULT_HEADERS[0],
                    RESULT_HEADERS[1],
                    RESULT_HEADERS[2],
                    RESULT_HEADERS[3],
                    RESULT_HEADERS[4]
                );
                for row in &view.rows {
                    println!(
                        "{:<8}{:<20}{:<20}{:<16}{:>12}{:>6}",
                        row.id,
                        row.player_name,
                        row.course_name,
                        row.layout_name,
                        row.total_score,
                        row.score_difference_text
                    );
                }
            }
            Command::Holes { scorecard_id } => {
                let view = controller.hole_scores(scorecard_id, None).await?;
                println!("{:<6}{:>8}{:>5}  Result", "Hole", "Strokes", "Par");
                for row in &view.rows {
                    println!(
                        "{:<6}{:>8}{:>5}  {}",
                        row.hole_number,
                        row.strokes,
                        row.par.map(|p| p.to_string()).unwrap_or_else(|| "-".into()),
                        row.label.unwrap_or("-")
                    );
                }
                match view.score_difference {
                    Some(difference) => println!(
                        "Total {} ({})",
                        view.total_strokes,
                        format_score_difference(difference)
                    ),
                    None => println!("Total {}", view.total_strokes),
                }
            }
        }
        Ok(())
    }

    fn print_list(items: &[String]) {
        for item in items {
            println!("{}", item);
        }
    }
}
