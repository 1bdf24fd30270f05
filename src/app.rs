use crate::{
    config::{Config, Intent},
    render,
};
use bank::Loader;
use lobby::{Lobby, Update};
use quiz::model::{PreparedQuestion, Question, QuizConfig, Summary, Urgency};
use std::io::Write;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

enum Setup {
    Start(Vec<PreparedQuestion>),
    /// The bank is empty. Load it again before retrying.
    Reload,
    Quit,
}

enum Played {
    Finished(Summary),
    /// The session refused to start. Back to setup.
    Refused,
    Abandoned,
}

enum Next {
    NewQuiz,
    Quit,
}

/// Setup, quiz, results and review screens until the user quits.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let Config { sources, quiz: mut settings } = config;
    let loader = Loader::from(sources);
    let mut input = BufReader::new(io::stdin()).lines();
    drive(&loader, &mut settings, &mut input).await
}

async fn drive<R>(loader: &Loader, settings: &mut QuizConfig, input: &mut Lines<R>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        // A failed load leaves an empty bank, so setup stays up until the user retries or quits
        let (questions, err) = loader.load_soft().await;
        if let Some(err) = err {
            println!("Failed to load questions. {err}");
        }

        let prepared = match setup(&questions, settings, input).await? {
            Setup::Start(prepared) => prepared,
            Setup::Reload => continue,
            Setup::Quit => return Ok(()),
        };

        let summary = match play(prepared, settings, input).await? {
            Played::Finished(summary) => summary,
            Played::Refused => continue,
            Played::Abandoned => return Ok(()),
        };

        match results(&summary, input).await? {
            Next::NewQuiz => continue,
            Next::Quit => return Ok(()),
        }
    }
}

/// Next line of input. `None` on end of input or Ctrl-C.
async fn read_line<R>(input: &mut Lines<R>) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    tokio::select! {
        line = input.next_line() => line,
        _ = tokio::signal::ctrl_c() => Ok(None),
    }
}

/// Applies setup commands until a selection succeeds.
async fn setup<R>(questions: &[Question], settings: &mut QuizConfig, input: &mut Lines<R>) -> anyhow::Result<Setup>
where
    R: AsyncBufRead + Unpin,
{
    let levels = quiz::available_difficulties(questions).join(", ");
    loop {
        println!(
            "\n{} questions, {}s each, difficulty `{}` (available: all, {levels})",
            settings.num_questions, settings.time_per_question, settings.difficulty
        );
        println!("`n <count>` questions, `t <secs>` per question, `d <level>` difficulty. Enter starts, q quits.");

        let Some(line) = read_line(input).await? else {
            return Ok(Setup::Quit);
        };

        match line.parse::<Intent>() {
            Ok(Intent::Start) => (),
            Ok(Intent::Quit) => return Ok(Setup::Quit),
            Ok(intent) => {
                intent.apply(settings);
                continue;
            }
            Err(err) => {
                println!("{err}");
                continue;
            }
        }

        match quiz::select(questions, settings, &mut rand::thread_rng()) {
            Ok(prepared) => return Ok(Setup::Start(prepared)),
            Err(err) => println!("{err}"),
        }

        if questions.is_empty() {
            return Ok(Setup::Reload);
        }
    }
}

fn show_timer(remaining_secs: u64, urgency: Urgency) {
    print!("\r  time left: {:<10}", render::timer(remaining_secs, urgency));
    let _ = std::io::stdout().flush();
}

async fn play<R>(prepared: Vec<PreparedQuestion>, settings: &QuizConfig, input: &mut Lines<R>) -> anyhow::Result<Played>
where
    R: AsyncBufRead + Unpin,
{
    let mut lobby = match Lobby::start(prepared, settings.time_limit()) {
        Ok(lobby) => lobby,
        Err(err) => {
            println!("{err}");
            return Ok(Played::Refused);
        }
    };

    let mut current = None::<PreparedQuestion>;
    loop {
        tokio::select! {
            update = lobby.next_update() => match update {
                Some(Update::Question { position, total, question, remaining_secs }) => {
                    print!("{}", render::question(position, total, &question));
                    show_timer(remaining_secs, Urgency::from_remaining(remaining_secs));
                    current = Some(question);
                }
                Some(Update::Tick { remaining_secs, urgency }) => show_timer(remaining_secs, urgency),
                Some(Update::Settled { record, score }) => {
                    println!("\n{} Score: {score}", render::settlement(&record));
                    current = None;
                }
                Some(Update::Finished(summary)) => return Ok(Played::Finished(summary)),
                None => return Ok(Played::Abandoned),
            },
            line = input.next_line() => {
                let Some(line) = line? else {
                    lobby.abandon();
                    return Ok(Played::Abandoned);
                };
                let Some(question) = &current else {
                    continue;
                };
                match render::parse_choice(&line, question.options()) {
                    Some(choice) => {
                        lobby.answer(choice);
                    }
                    None => {
                        let last = render::letter(question.options().len().saturating_sub(1));
                        println!("Pick one of A-{last}.");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                lobby.abandon();
                println!("\nQuiz abandoned.");
                return Ok(Played::Abandoned);
            }
        }
    }
}

async fn results<R>(summary: &Summary, input: &mut Lines<R>) -> anyhow::Result<Next>
where
    R: AsyncBufRead + Unpin,
{
    print!("{}", render::results(summary));
    loop {
        println!("[r] review answers  [n] new quiz  [q] quit");
        let Some(line) = read_line(input).await? else {
            return Ok(Next::Quit);
        };

        match line.trim() {
            "r" | "R" => print!("{}", render::review(summary)),
            "n" | "N" => return Ok(Next::NewQuiz),
            "q" | "Q" => return Ok(Next::Quit),
            _ => print!("{}", render::results(summary)),
        }
    }
}
