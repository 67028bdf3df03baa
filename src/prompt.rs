//! Prompt compilation: renders the active template against a generation
//! request, producing the exact text sent to the model.
//!
//! Substitution is best-effort by design. The template is administrator-edited
//! free text, so unknown placeholders stay verbatim and absent optional fields
//! degrade to empty clauses. Compilation never fails.

use crate::domain::GenerationRequest;
use crate::util::fill_template;

/// Built-in template used when no persisted configuration exists.
/// Placeholders are `{key}` names known to `compile_prompt`.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
Eres el asistente de evaluación de la UFV.
Genera preguntas que el profesorado pueda reutilizar en quices y pruebas escritas.
Nivel cognitivo: {bloom_levels}.
Tipos de pregunta: {question_types}.
{audience_clause}{context_clause}Contexto/temario: {syllabus_text}
Genera {number_of_questions} preguntas; cuando el tipo lo admita, incluye {alternatives_per_question} alternativas por pregunta.
Devuelve un JSON con campos: question, question_type, cognitive_level, answer_hint.
Incluye al menos una sugerencia para exportarlo a Excel/Word.";

/// Render `template` against `req`. Known keys are substituted; anything else
/// in the template is left untouched.
pub fn compile_prompt(req: &GenerationRequest, template: &str) -> String {
  let cfg = &req.prompt_config;
  let syllabus = req.syllabus_text.trim();
  let bloom = cfg.bloom_levels.join(", ");
  let types = cfg.question_types.join(", ");
  let count = cfg.number_of_questions.to_string();
  let alternatives = cfg.alternatives_per_question.to_string();

  let audience_clause = match cfg.target_audience.as_deref() {
    Some(a) if !a.trim().is_empty() => format!("Dirigido a: {}.\n", a.trim()),
    _ => String::new(),
  };
  let context_clause = match cfg.context.as_deref() {
    Some(c) if !c.trim().is_empty() => format!("Detalles adicionales: {}.\n", c.trim()),
    _ => String::new(),
  };

  fill_template(
    template,
    &[
      ("syllabus_text", syllabus),
      ("bloom_levels", &bloom),
      ("question_types", &types),
      ("number_of_questions", &count),
      ("alternatives_per_question", &alternatives),
      ("audience_clause", &audience_clause),
      ("context_clause", &context_clause),
    ],
  )
}
