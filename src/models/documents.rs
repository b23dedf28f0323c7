// src/models/documents.rs

use serde::Deserialize;

// Payload do "Livro de Alterações" (parte diária do armeiro). Todos os
// campos são opcionais: o documento imprime "___" onde faltar informação.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivroHeader {
    #[serde(default)]
    pub date_visto: Option<String>,
    #[serde(default)]
    pub fiscal: Option<String>,
    #[serde(default)]
    pub crpm: Option<String>,
    #[serde(default)]
    pub bpm: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivroIntro {
    #[serde(default)]
    pub bpm: Option<String>,
    #[serde(default)]
    pub date_start: Option<String>,
    #[serde(default)]
    pub date_end: Option<String>,
}

// Linha da escala de serviço (I Parte).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    #[serde(default)]
    pub grad: Option<String>,
    #[serde(default)]
    pub num: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub func: Option<String>,
    #[serde(default)]
    pub horario: Option<String>,
}

// Fecho do documento (V Parte + assinatura).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivroClosing {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub substitute: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivroContent {
    #[serde(default)]
    pub header: LivroHeader,
    #[serde(default)]
    pub intro: LivroIntro,
    #[serde(default)]
    pub part1: Vec<ScheduleRow>,
    #[serde(default)]
    pub part2: Option<String>,
    #[serde(default)]
    pub part3: Option<String>,
    #[serde(default)]
    pub part4: Option<String>,
    #[serde(default)]
    pub part5: LivroClosing,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivroData {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub content: LivroContent,
}
