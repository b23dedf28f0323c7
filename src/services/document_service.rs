// src/services/document_service.rs

use chrono::{DateTime, Datelike, NaiveDate};

use crate::models::documents::{LivroData, ScheduleRow};

const MESES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const DIAS_SEMANA: [&str; 7] = [
    "domingo",
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
];

// Gera o "Livro de Alterações" (parte diária do armeiro) como documento
// HTML imprimível. Formatação pura: nada aqui altera estado.
#[derive(Clone)]
pub struct DocumentService;

impl DocumentService {
    pub fn new() -> Self {
        Self
    }

    pub fn build_livro(&self, data: &LivroData) -> String {
        let header = &data.content.header;
        let intro = &data.content.intro;
        let part2 = data.content.part2.as_deref().unwrap_or("Sem alterações.");
        let part3 = data.content.part3.as_deref().unwrap_or("");
        let part4 = data
            .content
            .part4
            .as_deref()
            .unwrap_or("Sem alterações a registrar.");
        let part5 = &data.content.part5;

        let date_visto = formatar_data(header.date_visto.as_deref(), true);
        let date_start = formatar_data(intro.date_start.as_deref(), true);
        let date_end = formatar_data(intro.date_end.as_deref(), true);
        let armorer_date = formatar_data(part5.date.as_deref(), false);

        let armorer_name = data.author_name.as_deref().unwrap_or("NOME DO ARMEIRO");
        let armorer_matricula = data.author_id.as_deref().unwrap_or("000000");
        let armorer_city = part5.city.as_deref().unwrap_or("FORTALEZA");

        let escala_tabela = tabela_escala(&data.content.part1);

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8" />
    <title>Livro de Alterações</title>
    <style>
        body {{
            font-family: "Times New Roman", Times, serif;
            font-size: 12pt;
            margin: 25mm;
            line-height: 1.5;
        }}
        h1 {{
            text-align: center;
            font-weight: bold;
            margin-bottom: 30px;
        }}
        .parte-titulo {{
            text-align: center;
            font-weight: bold;
            margin-top: 25px;
            margin-bottom: 10px;
            font-size: 12pt;
            text-decoration: underline;
        }}
        table {{
            width: 100%;
            border-collapse: collapse;
            margin: 15px 0 25px 0;
        }}
        table, tr, td, th {{
            border: 1px solid black;
            padding: 5px;
            font-size: 11pt;
        }}
        th {{
            background-color: #f0f0f0;
            font-weight: bold;
        }}
        p {{
            text-align: left;
            margin: 10px 0;
        }}
        .assinatura-centralizada {{
            margin-top: 80px;
            text-align: center;
            width: 100%;
        }}
        .linha-assinatura {{
            border-top: 1px solid black;
            width: 300px;
            margin: 0 auto 10px auto;
            padding-top: 15px;
        }}
    </style>
</head>
<body>
    <h1>LIVRO DE ALTERAÇÕES</h1>

    <!-- CABEÇALHO -->
    <table>
        <tr>
            <td style="width: 35%; text-align: center; vertical-align: top;">
                <div style="font-weight: bold; font-size: 10pt;">VISTO POR ALTERAÇÃO</div>
                <div style="margin: 10px 0; font-size: 11pt;">{date_visto}</div>
                <div style="font-weight: bold; margin-top: 15px;">{fiscal}</div>
                <div style="font-weight: bold; font-size: 10pt;">RESPONSÁVEL</div>
            </td>
            <td style="width: 65%; text-align: center; vertical-align: middle;">
                <div style="font-weight: bold; font-size: 12pt;">POLÍCIA MILITAR DO CEARÁ</div>
                <div style="margin: 5px 0; font-size: 10pt; font-weight: bold;">
                    CRPM <strong>{crpm}</strong>
                    BPM <strong>{bpm}</strong>
                    <strong>{city}</strong>
                </div>
                <div style="font-weight: bold; text-decoration: underline; margin-top: 10px; font-size: 12pt;">
                    RESERVA DE ARMAMENTO
                </div>
            </td>
        </tr>
    </table>

    <!-- INTRODUÇÃO -->
    <p>
        Parte diária do armeiro do <strong>{intro_bpm}</strong> batalhão
        do dia <strong>{date_start}</strong> para o dia <strong>{date_end}</strong>,
        ao Senhor Fiscal Administrativo.
    </p>

    <!-- I – PARTE: ESCALA DE SERVIÇO -->
    <div class="parte-titulo">I – PARTE: ESCALA DE SERVIÇO</div>
    {escala_tabela}

    <!-- II – PARTE: INSTRUÇÃO -->
    <div class="parte-titulo">II – PARTE: INSTRUÇÃO</div>
    <p>{part2}</p>

    <!-- III – PARTE: ASSUNTOS GERAIS/ADMINISTRATIVOS -->
    <div class="parte-titulo">III – PARTE: ASSUNTOS GERAIS/ADMINISTRATIVOS</div>
    <div style="white-space: pre-line; font-size: 11pt;">{part3}</div>

    <!-- IV – PARTE: OCORRÊNCIAS -->
    <div class="parte-titulo">IV – PARTE: OCORRÊNCIAS</div>
    <p>Comunico-vos que:</p>
    <p>{part4}</p>

    <!-- V – PARTE: PASSAGEM DE SERVIÇO -->
    <div class="parte-titulo">V – PARTE: PASSAGEM DE SERVIÇO</div>
    <p style="margin-bottom: 30px;">
        FI-LA AO MEU SUBSTITUTO LEGAL, O <strong>{substitute}</strong>,
        A QUEM TRANSMITI TODAS AS ORDENS EM VIGOR, BEM COMO TODO MATERIAL A MEU CARGO.
    </p>

    <!-- ASSINATURA CENTRALIZADA -->
    <div class="assinatura-centralizada">
        <div style="font-weight: bold; margin-bottom: 20px;">
            {armorer_city}, {armorer_date}
        </div>
        <div class="linha-assinatura"></div>
        <div style="font-weight: bold; margin-bottom: 5px;">{armorer_name}</div>
        <div>MAT: {armorer_matricula}</div>
    </div>
</body>
</html>"#,
            fiscal = header.fiscal.as_deref().unwrap_or("NOME FISCAL"),
            crpm = header.crpm.as_deref().unwrap_or("___"),
            bpm = header.bpm.as_deref().unwrap_or("___"),
            city = header.city.as_deref().unwrap_or("CAUCAIA"),
            intro_bpm = intro.bpm.as_deref().unwrap_or("___"),
            substitute = part5.substitute.as_deref().unwrap_or("GRADUAÇÃO / NOME"),
        )
    }
}

impl Default for DocumentService {
    fn default() -> Self {
        Self::new()
    }
}

// Formata a data por extenso APENAS se ainda não estiver formatada
// (datas já por extenso contêm "de").
fn formatar_data(valor: Option<&str>, com_dia_semana: bool) -> String {
    let valor = match valor {
        Some(v) if !v.is_empty() => v,
        _ => return "___".to_string(),
    };
    if valor.contains("de") {
        return valor.to_string();
    }

    let date = DateTime::parse_from_rfc3339(valor)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(valor, "%Y-%m-%d"));
    let date = match date {
        Ok(d) => d,
        Err(_) => return "___".to_string(),
    };

    let dia = date.day();
    let mes = MESES[date.month0() as usize];
    let ano = date.year();

    if com_dia_semana {
        let semana = DIAS_SEMANA[date.weekday().num_days_from_sunday() as usize];
        format!("{dia} de {mes} de {ano} ({semana})")
    } else {
        format!("{dia} de {mes} de {ano}")
    }
}

fn tabela_escala(escala: &[ScheduleRow]) -> String {
    if escala.is_empty() {
        return "<p>Nenhuma escala definida.</p>".to_string();
    }

    let mut html = String::from(
        r#"
        <table>
            <thead>
                <tr>
                    <th>GRAD</th>
                    <th>Nº</th>
                    <th>NOME</th>
                    <th>FUNÇÃO</th>
                    <th>HORÁRIO</th>
                </tr>
            </thead>
            <tbody>"#,
    );

    for row in escala {
        html.push_str(&format!(
            r#"
                <tr>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                </tr>"#,
            row.grad.as_deref().unwrap_or("-"),
            row.num.as_deref().unwrap_or(""),
            row.name.as_deref().unwrap_or(""),
            row.func.as_deref().unwrap_or(""),
            row.horario.as_deref().unwrap_or(""),
        ));
    }

    html.push_str(
        r#"
            </tbody>
        </table>"#,
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::documents::{LivroContent, LivroIntro};

    #[test]
    fn data_iso_vira_data_por_extenso() {
        // 2024-03-15 foi uma sexta-feira
        assert_eq!(
            formatar_data(Some("2024-03-15"), true),
            "15 de março de 2024 (sexta-feira)"
        );
        assert_eq!(
            formatar_data(Some("2024-03-15"), false),
            "15 de março de 2024"
        );
    }

    #[test]
    fn data_ja_formatada_nao_e_reformatada() {
        assert_eq!(
            formatar_data(Some("15 de março de 2024"), true),
            "15 de março de 2024"
        );
    }

    #[test]
    fn data_ausente_ou_invalida_vira_tracos() {
        assert_eq!(formatar_data(None, true), "___");
        assert_eq!(formatar_data(Some("xyz"), true), "___");
    }

    #[test]
    fn livro_inclui_assinatura_e_escala() {
        let service = DocumentService::new();
        let data = LivroData {
            author_name: Some("Cb Souza".to_string()),
            author_id: Some("654321".to_string()),
            content: LivroContent {
                intro: LivroIntro {
                    bpm: Some("12º".to_string()),
                    date_start: Some("2024-03-15".to_string()),
                    date_end: Some("2024-03-16".to_string()),
                },
                ..Default::default()
            },
        };

        let html = service.build_livro(&data);
        assert!(html.contains("LIVRO DE ALTERAÇÕES"));
        assert!(html.contains("Cb Souza"));
        assert!(html.contains("MAT: 654321"));
        assert!(html.contains("15 de março de 2024"));
        assert!(html.contains("Nenhuma escala definida."));
    }
}
