// src/common/csv.rs
//
// Leitura e escrita de CSV para o export de assinaturas e o import de
// dealers. Todos os campos saem entre aspas; aspas internas são
// escapadas por duplicação.

// Escapa um campo: sempre entre aspas, aspas internas duplicadas
pub fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 2);
    out.push('"');
    for ch in field.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

// Monta uma linha a partir dos campos já em texto
pub fn write_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

// Quebra uma linha em células, respeitando aspas e aspas duplicadas.
// O parser é por linha: os arquivos aceitos não têm quebra de linha
// dentro de campo.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                // Aspas duplicadas dentro de campo = uma aspa literal
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => {
                    cells.push(current.trim().to_string());
                    current = String::new();
                }
                _ => current.push(ch),
            }
        }
    }
    cells.push(current.trim().to_string());
    cells
}

// Quebra o arquivo inteiro em linhas não vazias já parseadas
pub fn parse_rows(input: &str) -> Vec<Vec<String>> {
    input
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .map(parse_row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapa_todos_os_campos_com_aspas() {
        assert_eq!(escape_field("DLR12345"), "\"DLR12345\"");
        assert_eq!(escape_field(""), "\"\"");
    }

    #[test]
    fn duplica_aspas_internas() {
        assert_eq!(escape_field("Loja \"Central\""), "\"Loja \"\"Central\"\"\"");
    }

    #[test]
    fn linha_com_virgula_dentro_de_campo() {
        let row = write_row(&["Sharma, Tyres".to_string(), "ACTIVE".to_string()]);
        assert_eq!(row, "\"Sharma, Tyres\",\"ACTIVE\"");

        let parsed = parse_row(&row);
        assert_eq!(parsed, vec!["Sharma, Tyres", "ACTIVE"]);
    }

    #[test]
    fn parse_aceita_campos_sem_aspas() {
        assert_eq!(parse_row("DLR1, ACTIVE"), vec!["DLR1", "ACTIVE"]);
    }

    #[test]
    fn parse_ignora_linhas_vazias_e_crlf() {
        let rows = parse_rows("a,b\r\n\r\nc,d\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn roundtrip_de_aspas_escapadas() {
        let original = vec!["say \"hi\"".to_string(), "x,y".to_string()];
        let parsed = parse_row(&write_row(&original));
        assert_eq!(parsed, original);
    }
}
