//! The `okmatch answer` command.
//!
//! Offers the unanswered questions of a source file, then lets the user
//! author new questions, and writes the resulting collection to the target
//! file (or stdout).

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use okmatch_core::{AnswerCollection, AnsweredQuestion, MultiChoiceQuestion};

use crate::config::load_config_from;
use crate::prompt::Prompter;

pub fn execute(
    target: Option<PathBuf>,
    source: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let answers = load_if_present(target.as_deref())?;
    let template = load_if_present(source.as_deref())?;

    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stderr());
    let answers = run_session(&mut prompter, answers, &template)?;

    match &target {
        Some(path) => {
            okmatch_core::save_answers(&answers, path, config.pretty)?;
            tracing::info!(
                "wrote {} answered question(s) to {}",
                answers.len(),
                path.display()
            );
        }
        None => println!("{}", answers.to_json_string(config.pretty)?),
    }

    Ok(())
}

fn load_if_present(path: Option<&Path>) -> Result<AnswerCollection> {
    match path {
        Some(p) if p.is_file() => okmatch_core::load_answers(p),
        _ => Ok(AnswerCollection::new()),
    }
}

/// Drive one interactive session over `answers`, returning the updated
/// collection.
pub fn run_session<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    mut answers: AnswerCollection,
    template: &AnswerCollection,
) -> Result<AnswerCollection> {
    for question in answers.unanswered_from(template) {
        if let Some(answer) = answer_existing(prompter, question)? {
            answers.insert(answer, false)?;
        }
    }

    while prompter.affirm("add another question+answer?")? {
        let answer = author_question(prompter)?;
        match answers.insert(answer.clone(), false) {
            Ok(()) => {}
            Err(e) if e.is_duplicate() => {
                if prompter.affirm("question already answered, overwrite old answer?")? {
                    answers.insert(answer, true)?;
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(answers)
}

fn answer_existing<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    question: &MultiChoiceQuestion,
) -> Result<Option<AnsweredQuestion>> {
    prompter.say(&format!("QUESTION: {}", question.prompt()))?;
    for (i, text) in question.selectables().iter().enumerate() {
        prompter.say(&format!("#{i}: {text}"))?;
    }
    if !prompter.affirm("Answer this question?")? {
        return Ok(None);
    }

    let last = question.len() - 1;
    let choice = usize::try_from(prompter.number("your answer?", Some(last as u64))?)?;
    let importance = read_importance(prompter, "importance?")?;

    let mut acceptable = Vec::new();
    if importance > 0 {
        for (i, text) in question.selectables().iter().enumerate() {
            if prompter.affirm(&format!("acceptable answer? {text}"))? {
                acceptable.push(i);
            }
        }
    }

    Ok(Some(AnsweredQuestion::new(
        question.clone(),
        choice,
        acceptable,
        importance,
    )?))
}

fn author_question<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<AnsweredQuestion> {
    let prompt = prompter.string("question prompt: ")?;

    let mut selectables: Vec<String> = Vec::new();
    let mut acceptable = Vec::new();
    loop {
        let index = selectables.len();
        let text = loop {
            let text = prompter.string(&format!("answer #{index}: "))?;
            if !selectables.contains(&text) {
                break text;
            }
            prompter.say("duplicate answer, please try again")?;
        };
        selectables.push(text);

        if prompter.affirm("an acceptable answer of your ideal match?")? {
            acceptable.push(index);
        }
        if selectables.len() >= 2 && !prompter.affirm("add another answer?")? {
            break;
        }
    }

    let importance = read_importance(
        prompter,
        "how important is your ideal match's answer to you?",
    )?;
    let last = selectables.len() - 1;
    let choice = usize::try_from(
        prompter.number("your own choice of answer?", Some(last as u64))?,
    )?;

    let question = MultiChoiceQuestion::new(prompt, selectables)?;
    Ok(AnsweredQuestion::new(question, choice, acceptable, importance)?)
}

fn read_importance<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    prompt: &str,
) -> Result<u64> {
    prompter.number(prompt, None)
}
