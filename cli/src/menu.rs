use laureate_index::config::YearBounds;
use laureate_index::search::types::Category;
use laureate_index::service::api::LaureateService;
use laureate_index::service::protocol::{
    CategoryYearsRequest, LaureateNameRequest, MotivationKeywordRequest,
};
use std::io::{self, BufRead, Write};

/// Runs the interactive menu on stdin/stdout until the user exits.
pub async fn run(service: &dyn LaureateService, bounds: &YearBounds) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    session(service, bounds, &mut stdin.lock(), &mut stdout.lock()).await
}

/// Menu loop over arbitrary input/output. Ends on "4" or end of input.
pub async fn session<R, W>(
    service: &dyn LaureateService,
    bounds: &YearBounds,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(out)?;
        writeln!(out, "Nobel laureate queries")?;
        writeln!(out, "1. Count laureates by category and years")?;
        writeln!(out, "2. Count laureates by motivation keyword")?;
        writeln!(out, "3. Find prizes by laureate name")?;
        writeln!(out, "4. Exit")?;

        let Some(choice) = prompt(input, out, "Select an option: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(category) = read_category(input, out)? else {
                    return Ok(());
                };
                let Some(start_year) = read_year(input, out, bounds, "Start year")? else {
                    return Ok(());
                };
                let Some(end_year) = read_end_year(input, out, bounds, start_year)? else {
                    return Ok(());
                };
                let request = CategoryYearsRequest {
                    category: category.as_str().to_string(),
                    start_year,
                    end_year,
                };
                match service.count_laureates_by_category_and_years(request).await {
                    Ok(response) => writeln!(
                        out,
                        "Found {} laureates in {} between {}-{}",
                        response.count,
                        category.label(),
                        start_year,
                        end_year
                    )?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            "2" => {
                let Some(keyword) = prompt(input, out, "Keyword: ")? else {
                    return Ok(());
                };
                let request = MotivationKeywordRequest {
                    keyword: keyword.clone(),
                };
                match service.count_laureates_by_motivation_keyword(request).await {
                    Ok(response) => writeln!(
                        out,
                        "Found {} laureates with '{}' in their motivation",
                        response.count, keyword
                    )?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            "3" => {
                let Some(firstname) = prompt(input, out, "First name: ")? else {
                    return Ok(());
                };
                let Some(surname) = prompt(input, out, "Surname: ")? else {
                    return Ok(());
                };
                let request = LaureateNameRequest {
                    firstname: firstname.clone(),
                    surname: surname.clone(),
                };
                match service.get_laureate_details_by_name(request).await {
                    Ok(response) if response.details.is_empty() => {
                        writeln!(out, "No prizes found for {} {}", firstname, surname)?
                    }
                    Ok(response) => {
                        for detail in &response.details {
                            writeln!(out)?;
                            writeln!(out, "Year: {}", detail.year)?;
                            writeln!(out, "Category: {}", detail.category)?;
                            writeln!(out, "Motivation: {}", detail.motivation)?;
                        }
                    }
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            "4" => {
                writeln!(out, "Goodbye")?;
                return Ok(());
            }
            other => writeln!(out, "Unknown option '{}'", other)?,
        }
    }
}

/// Prints `label` and reads one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn read_category<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<Category>> {
    for (i, category) in Category::ALL.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, category.label())?;
    }
    loop {
        let Some(answer) = prompt(input, out, "Category number: ")? else {
            return Ok(None);
        };
        match answer.parse::<usize>() {
            Ok(n) if (1..=Category::ALL.len()).contains(&n) => {
                return Ok(Some(Category::ALL[n - 1]));
            }
            _ => writeln!(out, "Choose a number between 1 and {}", Category::ALL.len())?,
        }
    }
}

fn read_year<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    bounds: &YearBounds,
    label: &str,
) -> io::Result<Option<i32>> {
    let label = format!("{} ({}-{}): ", label, bounds.min, bounds.max);
    loop {
        let Some(answer) = prompt(input, out, &label)? else {
            return Ok(None);
        };
        match answer.parse::<i32>() {
            Ok(year) if bounds.contains(year) => return Ok(Some(year)),
            _ => writeln!(
                out,
                "Enter a year between {} and {}",
                bounds.min, bounds.max
            )?,
        }
    }
}

/// Like `read_year`, but also refuses years before `start_year`.
fn read_end_year<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    bounds: &YearBounds,
    start_year: i32,
) -> io::Result<Option<i32>> {
    loop {
        let Some(year) = read_year(input, out, bounds, "End year")? else {
            return Ok(None);
        };
        if year >= start_year {
            return Ok(Some(year));
        }
        writeln!(
            out,
            "End year must be greater than or equal to start year {}",
            start_year
        )?;
    }
}
