use sage_config::Language;
use sage_history::Turn;

const TRANSLATE_FEW_SHOT: &str = "\
Persian: حداقل پولی که میتونم باهاش سرمایه گذاری کنم چقدره؟
English: What is the minimum capital required to start investing?

Persian: تو این شرایط بازار چه نوع استراتژی پیشنهاد میدی؟
English: What kind of strategy do you recommend in this market condition?";

pub fn native_question(subject: &str, body: &str) -> String {
	format!("Subject: {subject}\nMessage: {body}")
}

pub fn translate_prompt(language: &Language, question: &str) -> String {
	format!(
		"{TRANSLATE_FEW_SHOT}\n{native}: {question}\n{retrieval}:",
		native = language.native,
		retrieval = language.retrieval,
	)
}

pub fn summary_prompt(turns: &[Turn]) -> String {
	let convo = turns
		.iter()
		.map(|turn| format!("User: {}\nAssistant: {}", turn.question, turn.answer))
		.collect::<Vec<_>>()
		.join("\n");

	format!(
		"Summarize this user-assistant conversation history for future context (finance-specific):\n\n{convo}"
	)
}

pub fn answer_prompt(
	language: &Language,
	native_question: &str,
	translated_question: &str,
	summary: &str,
	general_context: &str,
	expert_context: &str,
) -> String {
	let native = language.native.to_uppercase();
	let retrieval = language.retrieval.to_uppercase();

	format!(
		"Answer in {native} only, both written and spoken. Do NOT mix in any other language.
Do NOT mention that you are an AI or that you are reading from a source. Keep answers SHORT, CLEAR, and ACCURATE. You are acting as sales support at {brand}. Use ONLY the provided internal context as your main source.
Only if the context is clearly insufficient, use general financial knowledge, and clearly state that you are doing so.

### GENERAL KNOWLEDGE CONTEXT:
{general_context}

### EXPERT STRATEGY CONTEXT:
{expert_context}

### CONVERSATION SUMMARY:
{summary}

### {native} QUESTION:
{native_question}

### {retrieval} TRANSLATION:
{translated_question}

### FINAL ANSWER:",
		brand = language.brand,
	)
}

pub fn condense_prompt(language: &Language, draft: &str) -> String {
	format!(
		"Rewrite the following assistant reply in {native}, keeping it short (3-5 sentences), FRIENDLY, and based only on the original answer. Do not add any new content.\n\nOriginal answer:\n{draft}",
		native = language.native,
	)
}
