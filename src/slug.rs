//! Slug generation for category and waste names.

/// Latin spelling of a lowercase Cyrillic letter (Russian and Kazakh)
fn transliterate(c: char) -> Option<&'static str> {
    Some(match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'ә' => "a",
        'ғ' => "g",
        'қ' => "q",
        'ң' => "n",
        'ө' => "o",
        'ұ' | 'ү' => "u",
        'һ' => "h",
        'і' => "i",
        _ => return None,
    })
}

/// Lowercase ASCII slug: letters and digits, every other run collapsed to one `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        let piece: String = if c.is_ascii_alphanumeric() {
            c.to_string()
        } else if let Some(latin) = transliterate(c) {
            if latin.is_empty() {
                // soft/hard signs vanish without splitting the word
                continue;
            }
            latin.to_string()
        } else {
            pending_dash = true;
            continue;
        };

        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        slug.push_str(&piece);
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_russian_name_with_number() {
        assert_eq!(slugify("Пластик №1"), "plastik-1");
    }

    #[test]
    fn test_separators_collapse_and_trim() {
        assert_eq!(slugify("  Бумага / Картон -- 2 "), "bumaga-karton-2");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_multi_letter_and_signs() {
        assert_eq!(slugify("Щебень"), "shcheben");
        assert_eq!(slugify("Объём ЖБИ"), "obyom-zhbi");
    }

    #[test]
    fn test_kazakh_letters() {
        assert_eq!(slugify("Қағаз өнімі"), "qagaz-onimi");
    }

    #[test]
    fn test_latin_passthrough() {
        assert_eq!(slugify("PET Bottle"), "pet-bottle");
    }

    #[test]
    fn test_output_is_ascii() {
        let slug = slugify("Стеклотара, «Ёлка» и т.д.");
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
    }
}
